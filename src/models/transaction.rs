use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::TransactionKind;
use crate::types::{TransactionId, YearMonth};

/// One recorded ledger event for an advance account.
///
/// The sign convention follows the account balance: amounts that increase the
/// balance (create, top-up) are positive, amounts that reduce it (payment)
/// are non-positive. For the month a payment or deferral is attributed to,
/// the account keeps exactly one authoritative row, updated in place.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Monotonic identifier within the owning account.
    pub id: TransactionId,
    /// Wall-clock time the event was recorded (or last overwritten).
    pub ts: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Signed balance delta actually applied; zero for informational rows.
    pub amount: Decimal,
    /// The payroll month the event is attributed to.
    pub ym: YearMonth,
    pub note: Option<String>,
}
