mod advance_storage;
#[cfg(test)]
mod tests;

use crate::models::AdvanceAccount;
use crate::types::EmpId;

pub use advance_storage::AdvanceStorage;

/// Checkout-style persistence used by the batch actors: `load` removes the
/// account from the store and `save` puts it back, giving the actor exclusive
/// ownership for the duration of a batch run.
pub trait Storage: Send + Sync + 'static {
    fn load(&self, emp_no: &str) -> Option<AdvanceAccount>;
    fn save(&self, emp_no: EmpId, account: AdvanceAccount);
}
