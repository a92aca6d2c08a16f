mod batch;
mod boundary;
mod ledger;

pub use batch::BatchEngine;
pub use boundary::{AccountView, BalanceRow, CreateAdvance, SetPayment, TopUp, UpdateInstallment};
pub use ledger::LedgerEngine;
