#[cfg(test)]
mod tests;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::types::YearMonth;

/// Outcome of a payoff projection.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Payoff {
    /// Nothing left to repay.
    Cleared,
    /// No positive installment is set, so no projection exists.
    NoInstallment,
    Projected {
        months_to_clear: u32,
        payoff_month: YearMonth,
    },
}

/// Projects when a balance clears at a fixed monthly installment.
///
/// Divides the balance by the installment and rounds up to whole months. The
/// reference month counts as the first installment month, so a balance that
/// clears in one installment pays off in the reference month itself.
pub fn project_payoff(balance: Decimal, installment: Decimal, reference: YearMonth) -> Payoff {
    if balance <= Decimal::ZERO {
        return Payoff::Cleared;
    }

    if installment <= Decimal::ZERO {
        return Payoff::NoInstallment;
    }

    let months_to_clear = (balance / installment).ceil().to_u32().unwrap_or(u32::MAX);

    Payoff::Projected {
        months_to_clear,
        payoff_month: reference.plus_months(months_to_clear - 1),
    }
}
