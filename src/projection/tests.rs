use super::{Payoff, project_payoff};
use crate::types::YearMonth;
use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

fn reference() -> Result<YearMonth> {
    Ok(YearMonth::from_str("2024-01")?)
}

#[test]
fn test_exact_division_clears_in_whole_months() -> Result<()> {
    let payoff = project_payoff(Decimal::from(3000), Decimal::from(500), reference()?);

    assert_eq!(
        payoff,
        Payoff::Projected {
            months_to_clear: 6,
            payoff_month: YearMonth::from_str("2024-06")?,
        }
    );

    Ok(())
}

#[test]
fn test_partial_final_installment_rounds_up() -> Result<()> {
    let payoff = project_payoff(Decimal::from(1100), Decimal::from(500), reference()?);

    assert_eq!(
        payoff,
        Payoff::Projected {
            months_to_clear: 3,
            payoff_month: YearMonth::from_str("2024-03")?,
        }
    );

    Ok(())
}

#[test]
fn test_single_installment_pays_off_in_the_reference_month() -> Result<()> {
    let payoff = project_payoff(Decimal::from(400), Decimal::from(500), reference()?);

    assert_eq!(
        payoff,
        Payoff::Projected {
            months_to_clear: 1,
            payoff_month: reference()?,
        }
    );

    Ok(())
}

#[test]
fn test_payoff_month_rolls_over_year_boundaries() -> Result<()> {
    let reference = YearMonth::from_str("2024-11")?;
    let payoff = project_payoff(Decimal::from(1000), Decimal::from(250), reference);

    assert_eq!(
        payoff,
        Payoff::Projected {
            months_to_clear: 4,
            payoff_month: YearMonth::from_str("2025-02")?,
        }
    );

    Ok(())
}

#[test]
fn test_zero_or_negative_balance_reports_cleared() -> Result<()> {
    assert_eq!(project_payoff(Decimal::ZERO, Decimal::from(500), reference()?), Payoff::Cleared);
    assert_eq!(project_payoff(Decimal::from(-1), Decimal::from(500), reference()?), Payoff::Cleared);

    Ok(())
}

#[test]
fn test_missing_installment_reports_distinct_state() -> Result<()> {
    assert_eq!(
        project_payoff(Decimal::from(1000), Decimal::ZERO, reference()?),
        Payoff::NoInstallment
    );

    Ok(())
}

#[test]
fn test_fractional_amounts_project_correctly() -> Result<()> {
    let payoff = project_payoff(
        Decimal::from_str("1000.01")?,
        Decimal::from_str("500.00")?,
        reference()?,
    );

    assert_eq!(
        payoff,
        Payoff::Projected {
            months_to_clear: 3,
            payoff_month: YearMonth::from_str("2024-03")?,
        }
    );

    Ok(())
}
