use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use crate::engine::boundary::{AccountView, BalanceRow, CreateAdvance, SetPayment, TopUp, UpdateInstallment};
use crate::models::{AdvanceAccount, LedgerError, Transaction};
use crate::projection::{Payoff, project_payoff};
use crate::storage::AdvanceStorage;
use crate::types::{EmpId, YearMonth, money};

/// The operation surface of the advance ledger.
///
/// Every mutating call validates its input, then updates the account and its
/// transaction log as one unit under the store's per-account lock; partial
/// application cannot happen because validation precedes any mutation inside
/// the critical section. Read paths are pure queries.
pub struct LedgerEngine {
    storage: Arc<AdvanceStorage>,
}

impl LedgerEngine {
    pub fn new(storage: Arc<AdvanceStorage>) -> Self {
        Self { storage }
    }

    /// Opens a new advance account.
    ///
    /// # Errors
    /// `InvalidArgument` for a bad principal or installment, `AlreadyExists`
    /// when the employee already has an account (the caller may offer a
    /// top-up instead; the engine never converts on its own).
    pub fn create(&self, request: CreateAdvance) -> Result<AccountView, LedgerError> {
        let principal = self.normalize(&request.emp_no, &request.amount)?;
        let installment = self.normalize(&request.emp_no, &request.monthly_installment)?;
        let ym = YearMonth::from_date(request.posting_date);

        let account = AdvanceAccount::open(
            request.emp_no.clone(),
            principal,
            installment,
            ym,
            request.note,
        )?;

        let view = AccountView::from(&account);
        self.storage.insert_new(account)?;

        debug!("Advance created for employee [{}] in [{ym}]", request.emp_no);

        Ok(view)
    }

    /// Increases an existing advance.
    ///
    /// # Errors
    /// `InvalidArgument` for a non-positive amount, `NotFound` when the
    /// employee has no account; the engine does not auto-create.
    pub fn top_up(&self, request: TopUp) -> Result<AccountView, LedgerError> {
        let amount = self.normalize(&request.emp_no, &request.amount)?;
        let ym = YearMonth::from_date(request.posting_date);

        self.storage.update(&request.emp_no, |account| {
            account.top_up(amount, ym, request.note)?;
            Ok(AccountView::from(&*account))
        })
    }

    /// Sets (or re-sets) the payment collected for a payroll month.
    pub fn set_payment(&self, request: SetPayment) -> Result<AccountView, LedgerError> {
        let amount = self.normalize(&request.emp_no, &request.amount)?;

        self.storage.update(&request.emp_no, |account| {
            account.set_payment(request.ym, amount, request.note);
            Ok(AccountView::from(&*account))
        })
    }

    /// Records that no payment was collected for the month.
    pub fn defer(&self, emp_no: &str, ym: YearMonth) -> Result<AccountView, LedgerError> {
        self.storage.update(emp_no, |account| {
            account.set_payment(ym, Decimal::ZERO, None);
            Ok(AccountView::from(&*account))
        })
    }

    /// Changes the monthly installment, optionally applying it as the
    /// month's payment. Both effects land atomically or not at all.
    pub fn update_installment(&self, request: UpdateInstallment) -> Result<AccountView, LedgerError> {
        let installment = self.normalize(&request.emp_no, &request.monthly_installment)?;

        self.storage.update(&request.emp_no, |account| {
            account.change_installment(installment, request.ym, request.apply_to_month, request.note)?;
            Ok(AccountView::from(&*account))
        })
    }

    /// Records the standard installment as the month's payment for every
    /// account that still carries a balance and has no PAYMENT/DEFER row for
    /// `ym` yet. The deduction never exceeds the remaining balance. Returns
    /// the number of accounts deducted; running the same month twice deducts
    /// nothing the second time.
    pub fn run_monthly_deductions(&self, ym: YearMonth) -> usize {
        let emp_nos: Vec<EmpId> = self.storage.iter().map(|entry| entry.key().clone()).collect();
        let mut deducted = 0;

        for emp_no in emp_nos {
            let result = self.storage.update(&emp_no, |account| Ok(account.auto_deduct(ym)));

            if let Ok(Some(amount)) = result {
                debug!("Auto deduction of [{amount}] for employee [{emp_no}] in [{ym}]");
                deducted += 1;
            }
        }

        deducted
    }

    /// All accounts with their current balance and installment, ordered by
    /// employee number.
    pub fn list_balances(&self) -> Vec<BalanceRow> {
        let mut rows: Vec<BalanceRow> = self
            .storage
            .iter()
            .map(|entry| BalanceRow::from(entry.value()))
            .collect();

        rows.sort_by(|left, right| left.emp_no.cmp(&right.emp_no));
        rows
    }

    /// The employee's transaction history, oldest first, with amounts
    /// rescaled to cents like every other monetary field on the surface.
    ///
    /// Monthly rows are updated in place, so superseded payments do not
    /// appear here.
    pub fn history(&self, emp_no: &str) -> Result<Vec<Transaction>, LedgerError> {
        let account = self
            .storage
            .get(emp_no)
            .ok_or_else(|| LedgerError::not_found(emp_no))?;

        let rows = account
            .transactions()
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.amount = money::cents(row.amount);
                row
            })
            .collect();

        Ok(rows)
    }

    /// Projects when the balance clears at the current installment, counting
    /// `reference` as the first installment month.
    pub fn payoff(&self, emp_no: &str, reference: YearMonth) -> Result<Payoff, LedgerError> {
        let account = self
            .storage
            .get(emp_no)
            .ok_or_else(|| LedgerError::not_found(emp_no))?;

        Ok(project_payoff(account.balance, account.monthly_installment, reference))
    }

    fn normalize(&self, emp_no: &str, raw: &str) -> Result<Decimal, LedgerError> {
        money::normalize(raw).map_err(|error| LedgerError::invalid_argument(emp_no, error.to_string()))
    }
}
