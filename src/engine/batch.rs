use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tokio::task::{JoinHandle, spawn_blocking};
use tracing::error;

use crate::actors::AccountActor;
use crate::models::Operation;
use crate::storage::AdvanceStorage;
use crate::types::EmpId;

/// Bulk-import pipeline for an operations CSV.
///
/// Streams rows from a blocking reader task through a bounded channel and
/// partitions them by employee into per-employee actors, preserving strict
/// per-account ordering while unrelated employees process in parallel.
pub struct BatchEngine {
    storage: Arc<AdvanceStorage>,
    backpressure: usize,
}

impl BatchEngine {
    pub fn new(storage: Arc<AdvanceStorage>) -> Self {
        Self {
            storage,
            backpressure: 256,
        }
    }

    /// Orchestrates the end-to-end import of one operations CSV.
    pub async fn run(&self, path: &str) -> anyhow::Result<()> {
        let (sender, receiver) = mpsc::channel::<Operation>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let processing_result = self.process_operations(receiver).await;

        if let Err(error) = csv_handle.await {
            error!("CSV ingestion failed: {error}");
        }

        processing_result
    }

    fn spawn_csv_reader(&self, path: String, sender: mpsc::Sender<Operation>) -> JoinHandle<()> {
        spawn_blocking(move || {
            let file = match File::open(&path) {
                Ok(file) => file,
                Err(error) => {
                    error!("Error opening CSV at path: {path} | {error}");
                    return;
                }
            };

            let mut reader = ReaderBuilder::new()
                .trim(Trim::All)
                .flexible(true)
                .from_reader(BufReader::new(file));

            for result in reader.deserialize::<Operation>() {
                match result {
                    Ok(operation) => {
                        if sender.blocking_send(operation).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        error!("CSV deserialization error: {error}");
                    }
                }
            }
        })
    }

    async fn process_operations(&self, mut receiver: mpsc::Receiver<Operation>) -> anyhow::Result<()> {
        let mut actors = HashMap::<EmpId, AccountActor>::new();

        while let Some(operation) = receiver.recv().await {
            let actor = actors.entry(operation.emp_no.clone()).or_insert_with(|| {
                AccountActor::new(operation.emp_no.clone(), self.storage.clone())
            });

            if !actor.accept(&operation) {
                error!(
                    "Account actor for employee [{}] could not accept an operation",
                    operation.emp_no
                );
            }
        }

        //NOTE: Graceful shutdown: each actor drains its queue and checks its
        //      account back into storage before the run completes.
        for (emp_no, actor) in actors {
            if let Err(error) = actor.despawn().await {
                error!("Account actor for employee [{emp_no}] did not despawn gracefully: {error:?}");
            }
        }

        Ok(())
    }
}
