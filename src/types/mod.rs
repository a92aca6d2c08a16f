mod errors;
pub mod money;
#[cfg(test)]
mod tests;
mod year_month;

pub use errors::{MoneyError, YearMonthError};
pub use year_month::YearMonth;

/// Employee number, as issued by the employee master directory (e.g. "E042").
pub type EmpId = String;
/// Per-account monotonic transaction identifier.
pub type TransactionId = u64;
