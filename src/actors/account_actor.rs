use std::sync::Arc;

use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::models::{AdvanceAccount, Operation};
use crate::storage::Storage;
use crate::types::EmpId;

/// Owns one employee's account for the duration of a batch run.
///
/// All operations for an employee funnel through that employee's actor, which
/// gives strict per-account ordering while different employees process in
/// parallel. The account is checked out of storage on spawn and checked back
/// in when the actor drains its queue and despawns.
pub struct AccountActor {
    sender: mpsc::UnboundedSender<Operation>,
    handle: JoinHandle<()>,
}

impl AccountActor {
    pub fn new<S: Storage>(emp_no: EmpId, storage: Arc<S>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Operation>();

        let handle = spawn(async move {
            let mut slot = storage.load(&emp_no);

            while let Some(operation) = receiver.recv().await {
                match AdvanceAccount::apply(&mut slot, &operation) {
                    Ok(_) => {
                        debug!(
                            "Operation [{:?}] for employee [{}] processed",
                            operation.kind, operation.emp_no
                        );
                    }
                    Err(error) => {
                        //NOTE: A rejected operation is not critical to the batch; it is
                        //      surfaced in the log and the rest of the stream continues.
                        warn!("{error}");
                    }
                }
            }

            if let Some(account) = slot {
                storage.save(emp_no, account);
            }
        });

        Self { sender, handle }
    }

    /// Queues an operation; returns false if the actor has already stopped.
    pub fn accept(&self, operation: &Operation) -> bool {
        self.sender.send(operation.clone()).is_ok()
    }

    /// Closes the queue and waits for the actor to drain and check its
    /// account back into storage.
    pub async fn despawn(self) -> Result<(), JoinError> {
        let Self { sender, handle } = self;
        drop(sender);
        handle.await
    }
}
