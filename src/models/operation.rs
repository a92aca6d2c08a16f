use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{LedgerError, OperationKind};
use crate::types::{EmpId, YearMonth, money};

/// Represents a single row from a batch-import operations CSV.
///
/// All columns except `op` and `emp` are optional at the parsing level; each
/// operation kind requires its own subset and rejects the row with
/// `InvalidArgument` when something is missing. Amounts stay textual here and
/// are normalized on access, so "1,500.00" is accepted and garbage never
/// silently becomes zero.
#[derive(Debug, Clone, Deserialize)]
pub struct Operation {
    #[serde(rename = "op")]
    pub kind: OperationKind,
    #[serde(rename = "emp")]
    pub emp_no: EmpId,
    /// Payroll month the operation is attributed to.
    pub ym: Option<YearMonth>,
    /// Textual amount (principal, top-up, or payment magnitude).
    pub amount: Option<String>,
    /// Textual monthly installment (create / installment change).
    pub installment: Option<String>,
    /// For installment changes: also record the new installment as this
    /// month's payment.
    pub apply: Option<bool>,
    /// Posting date; used to derive the month when `ym` is absent.
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl Operation {
    pub fn parse_amount(&self) -> Result<Decimal, LedgerError> {
        let raw = self
            .amount
            .as_deref()
            .ok_or_else(|| LedgerError::invalid_argument(&self.emp_no, "amount is required"))?;

        money::normalize(raw)
            .map_err(|error| LedgerError::invalid_argument(&self.emp_no, error.to_string()))
    }

    pub fn parse_installment(&self) -> Result<Decimal, LedgerError> {
        let raw = self.installment.as_deref().ok_or_else(|| {
            LedgerError::invalid_argument(&self.emp_no, "monthly installment is required")
        })?;

        money::normalize(raw)
            .map_err(|error| LedgerError::invalid_argument(&self.emp_no, error.to_string()))
    }

    /// The payroll month: the explicit `ym` column, or the posting date's month.
    pub fn posting_month(&self) -> Result<YearMonth, LedgerError> {
        self.ym
            .or_else(|| self.date.map(YearMonth::from_date))
            .ok_or_else(|| {
                LedgerError::invalid_argument(&self.emp_no, "a year-month or posting date is required")
            })
    }
}
