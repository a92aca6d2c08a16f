mod account;
mod errors;
mod operation;
mod transaction;

use serde::{Deserialize, Serialize};

pub use account::AdvanceAccount;
pub use errors::LedgerError;
pub use operation::Operation;
pub use transaction::Transaction;

/// The kind of a recorded ledger transaction.
///
/// `Create` and `Topup` carry a positive amount, `Payment` a non-positive
/// one, `Defer` zero, and `InstallmentChange` is informational (amount zero).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Create,
    Topup,
    Payment,
    Defer,
    InstallmentChange,
}

/// One row of a batch-import operations CSV.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Create,
    Topup,
    Payment,
    Defer,
    Installment,
}
