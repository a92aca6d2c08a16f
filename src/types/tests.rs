use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

use super::YearMonth;
use super::money;

#[test]
fn test_normalize_accepts_plain_and_separated_amounts() -> Result<()> {
    let test_cases = vec![
        ("1500", "1500.00"),
        ("1,500.00", "1500.00"),
        ("  2,000.5  ", "2000.50"),
        ("0", "0.00"),
        ("-250.75", "-250.75"),
        ("1,234,567.89", "1234567.89"),
    ];

    for (input_string, expected_output) in test_cases {
        let amount = money::normalize(input_string)?;
        assert_eq!(money::cents(amount).to_string(), expected_output);
    }

    Ok(())
}

#[test]
fn test_normalize_rounds_sub_cent_amounts_to_cents() -> Result<()> {
    assert_eq!(money::normalize("10.005")?.to_string(), "10.01");
    assert_eq!(money::normalize("10.004")?.to_string(), "10.00");

    Ok(())
}

#[test]
fn test_normalize_rejects_invalid_amounts() {
    assert!(money::normalize("").is_err());
    assert!(money::normalize("   ").is_err());
    assert!(money::normalize("abc").is_err());
    assert!(money::normalize("1.2.3").is_err());
    assert!(money::normalize("12 34").is_err());
}

#[test]
fn test_cents_rescales_for_display() -> Result<()> {
    assert_eq!(money::cents(Decimal::from(3000)).to_string(), "3000.00");
    assert_eq!(money::cents(Decimal::from_str("1.5")?).to_string(), "1.50");

    Ok(())
}

#[test]
fn test_year_month_parses_and_displays() -> Result<()> {
    let ym = YearMonth::from_str("2024-03")?;

    assert_eq!(ym.year(), 2024);
    assert_eq!(ym.month(), 3);
    assert_eq!(ym.to_string(), "2024-03");

    Ok(())
}

#[test]
fn test_year_month_rejects_invalid_input() {
    assert!(YearMonth::from_str("2024").is_err());
    assert!(YearMonth::from_str("2024-13").is_err());
    assert!(YearMonth::from_str("2024-00").is_err());
    assert!(YearMonth::from_str("garbage").is_err());
}

#[test]
fn test_year_month_addition_rolls_over_years() -> Result<()> {
    let ym = YearMonth::from_str("2024-11")?;

    assert_eq!(ym.plus_months(0).to_string(), "2024-11");
    assert_eq!(ym.plus_months(1).to_string(), "2024-12");
    assert_eq!(ym.plus_months(2).to_string(), "2025-01");
    assert_eq!(ym.plus_months(26).to_string(), "2027-01");

    Ok(())
}

#[test]
fn test_year_month_ordering_is_chronological() -> Result<()> {
    assert!(YearMonth::from_str("2024-02")? < YearMonth::from_str("2024-03")?);
    assert!(YearMonth::from_str("2024-12")? < YearMonth::from_str("2025-01")?);

    Ok(())
}
