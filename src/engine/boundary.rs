//! Typed request/response shapes of the ledger surface.
//!
//! Amounts arrive as text and are normalized inside the engine; no monetary
//! field is ever coerced on failure. Responses carry cent-rescaled decimals.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AdvanceAccount;
use crate::types::{EmpId, YearMonth, money};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdvance {
    pub emp_no: EmpId,
    /// Principal amount disbursed.
    pub amount: String,
    pub monthly_installment: String,
    #[serde(default)]
    pub note: Option<String>,
    pub posting_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopUp {
    pub emp_no: EmpId,
    pub amount: String,
    #[serde(default)]
    pub note: Option<String>,
    pub posting_date: NaiveDate,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetPayment {
    pub emp_no: EmpId,
    pub ym: YearMonth,
    /// Payment magnitude for the month; zero records a deferral.
    pub amount: String,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateInstallment {
    pub emp_no: EmpId,
    pub monthly_installment: String,
    pub ym: YearMonth,
    /// Also record the new installment as this month's payment.
    pub apply_to_month: bool,
    #[serde(default)]
    pub note: Option<String>,
}

/// Snapshot of an account returned by every mutating operation.
#[derive(Debug, Clone, Serialize)]
pub struct AccountView {
    pub emp_no: EmpId,
    pub balance: Decimal,
    pub monthly_installment: Decimal,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl From<&AdvanceAccount> for AccountView {
    fn from(account: &AdvanceAccount) -> Self {
        Self {
            emp_no: account.emp_no.clone(),
            balance: money::cents(account.balance),
            monthly_installment: money::cents(account.monthly_installment),
            created_at: account.created_at,
            modified_at: account.modified_at,
        }
    }
}

/// One row of the balances listing.
#[derive(Debug, Clone, Serialize)]
pub struct BalanceRow {
    pub emp_no: EmpId,
    pub balance: Decimal,
    pub monthly_installment: Decimal,
}

impl From<&AdvanceAccount> for BalanceRow {
    fn from(account: &AdvanceAccount) -> Self {
        Self {
            emp_no: account.emp_no.clone(),
            balance: money::cents(account.balance),
            monthly_installment: money::cents(account.monthly_installment),
        }
    }
}
