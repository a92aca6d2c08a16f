//! Employee cash-advance ledger: accounts, monthly repayments, and payoff
//! projection for a payroll/timesheet back office.

pub mod actors;
pub mod engine;
pub mod models;
pub mod projection;
pub mod storage;
pub mod types;
