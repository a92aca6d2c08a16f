use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoneyError {
    #[error("Money error: value is an empty string")]
    Empty,
    #[error("Money error: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Error)]
pub enum YearMonthError {
    #[error("Year-month error: expected YYYY-MM, got {0:?}")]
    InvalidFormat(String),
    #[error("Year-month error: month {0} is out of range")]
    MonthOutOfRange(u32),
}
