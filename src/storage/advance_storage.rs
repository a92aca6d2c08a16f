use std::sync::Arc;

use dashmap::DashMap;
use dashmap::iter::Iter;
use dashmap::mapref::entry::Entry;

use crate::models::{AdvanceAccount, LedgerError};
use crate::storage::Storage;
use crate::types::EmpId;

/// In-memory account store keyed by employee number.
///
/// Mutations for the same employee serialize on the map entry's shard lock,
/// so a closure passed to `update` runs as a single-writer critical section;
/// operations on different employees proceed in parallel.
pub struct AdvanceStorage {
    cache: Arc<DashMap<EmpId, AdvanceAccount>>,
}

impl AdvanceStorage {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(DashMap::new()),
        }
    }

    /// Inserts a freshly opened account.
    ///
    /// # Errors
    /// `AlreadyExists` when the employee already has an advance account; the
    /// existing account is left untouched so the caller can offer a top-up
    /// instead.
    pub fn insert_new(&self, account: AdvanceAccount) -> Result<(), LedgerError> {
        match self.cache.entry(account.emp_no.clone()) {
            Entry::Occupied(_) => Err(LedgerError::already_exists(&account.emp_no)),
            Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            }
        }
    }

    /// Runs `mutate` with exclusive access to the employee's account.
    ///
    /// # Errors
    /// `NotFound` when no account exists, plus whatever `mutate` returns.
    pub fn update<T>(
        &self,
        emp_no: &str,
        mutate: impl FnOnce(&mut AdvanceAccount) -> Result<T, LedgerError>,
    ) -> Result<T, LedgerError> {
        let mut account = self
            .cache
            .get_mut(emp_no)
            .ok_or_else(|| LedgerError::not_found(emp_no))?;

        mutate(&mut account)
    }

    /// Clones out the employee's account for read-only use.
    pub fn get(&self, emp_no: &str) -> Option<AdvanceAccount> {
        self.cache.get(emp_no).map(|account| account.clone())
    }

    pub fn iter(&self) -> Iter<'_, EmpId, AdvanceAccount> {
        self.cache.iter()
    }
}

impl Default for AdvanceStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for AdvanceStorage {
    fn load(&self, emp_no: &str) -> Option<AdvanceAccount> {
        self.cache.remove(emp_no).map(|(_, account)| account)
    }

    fn save(&self, emp_no: EmpId, account: AdvanceAccount) {
        self.cache.insert(emp_no, account);
    }
}
