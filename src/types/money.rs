use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::errors::MoneyError;

const CENT_PLACES: u32 = 2;

/// Parses a textual monetary amount into a cent-precision decimal.
///
/// Operators type amounts with thousands separators ("1,500.00"), so commas
/// are stripped before parsing. A value that does not parse is an error,
/// never silently coerced to zero.
pub fn normalize(value: &str) -> Result<Decimal, MoneyError> {
    let cleaned = value.trim().replace(',', "");

    if cleaned.is_empty() {
        return Err(MoneyError::Empty);
    }

    let parsed = Decimal::from_str(&cleaned)
        .map_err(|error| MoneyError::InvalidFormat(format!("{value:?} is not an amount: {error}")))?;

    Ok(parsed.round_dp_with_strategy(CENT_PLACES, RoundingStrategy::MidpointAwayFromZero))
}

/// Rescales an amount to exactly two decimal places for display and export.
pub fn cents(value: Decimal) -> Decimal {
    let mut rescaled = value;
    rescaled.rescale(CENT_PLACES);
    rescaled
}
