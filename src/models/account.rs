use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::models::{LedgerError, Operation, OperationKind, Transaction, TransactionKind};
use crate::types::{EmpId, TransactionId, YearMonth};

const DEFAULT_CREATE_NOTE: &str = "Advance given";
const DEFAULT_TOPUP_NOTE: &str = "Top-up";
const DEFAULT_DEFER_NOTE: &str = "Deferred";
const DEFAULT_INSTALLMENT_NOTE: &str = "Updated with installment";
const AUTO_DEDUCTION_NOTE: &str = "Auto monthly deduction";

/// A single employee's cash-advance account together with its transaction log.
///
/// The account owns its log: every balance change goes through a method here,
/// which keeps the balance and the audit trail in sync as one unit. Two
/// invariants hold at rest: the balance never goes negative (payments larger
/// than the remainder clamp it to zero), and the monthly installment is
/// always positive.
///
/// Monthly payments and deferrals are an upsert, not an append: at most one
/// PAYMENT/DEFER row exists per payroll month, updated in place, and its
/// amount is the delta actually applied so that re-setting a month's payment
/// can exactly reverse it first.
#[derive(Debug, Clone)]
pub struct AdvanceAccount {
    pub emp_no: EmpId,
    /// Amount currently owed by the employee.
    pub balance: Decimal,
    /// Standard monthly repayment amount.
    pub monthly_installment: Decimal,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    /// Append-ordered log; PAYMENT/DEFER rows are overwritten in place.
    transactions: Vec<Transaction>,
    /// Index of the authoritative PAYMENT/DEFER row per payroll month.
    monthly: HashMap<YearMonth, usize>,
    next_id: TransactionId,
}

impl AdvanceAccount {
    /// Opens a new advance account with an initial principal.
    ///
    /// # Errors
    /// `InvalidArgument` if the principal or the installment is not positive.
    pub fn open(
        emp_no: EmpId,
        principal: Decimal,
        installment: Decimal,
        ym: YearMonth,
        note: Option<String>,
    ) -> Result<Self, LedgerError> {
        if principal <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument(&emp_no, "principal must be positive"));
        }

        if installment <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument(
                &emp_no,
                "monthly installment must be positive",
            ));
        }

        let now = Utc::now();

        let mut account = Self {
            emp_no,
            balance: principal,
            monthly_installment: installment,
            created_at: now,
            modified_at: now,
            transactions: Vec::new(),
            monthly: HashMap::new(),
            next_id: 1,
        };

        account.record(
            TransactionKind::Create,
            principal,
            ym,
            Some(note.unwrap_or_else(|| DEFAULT_CREATE_NOTE.to_string())),
        );

        Ok(account)
    }

    /// Increases the balance of an existing advance without touching the
    /// installment.
    ///
    /// # Errors
    /// `InvalidArgument` if the amount is not positive.
    pub fn top_up(
        &mut self,
        amount: Decimal,
        ym: YearMonth,
        note: Option<String>,
    ) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument(
                &self.emp_no,
                "top-up amount must be positive",
            ));
        }

        self.balance += amount;
        self.record(
            TransactionKind::Topup,
            amount,
            ym,
            Some(note.unwrap_or_else(|| DEFAULT_TOPUP_NOTE.to_string())),
        );

        Ok(())
    }

    /// Sets the payment collected for a payroll month.
    ///
    /// The input is the payment magnitude the operator intends for the month;
    /// it is normalized to a non-positive balance delta (`0` stays `0`,
    /// anything else becomes `-abs(amount)`). If the month already has a
    /// PAYMENT/DEFER row, its recorded delta is reversed first, which makes
    /// repeated calls for the same month idempotent in their net effect
    /// rather than additive. A zero amount records a deferral.
    pub fn set_payment(&mut self, ym: YearMonth, amount: Decimal, note: Option<String>) {
        let delta = if amount.is_zero() {
            Decimal::ZERO
        } else {
            -amount.abs()
        };

        let kind = if delta.is_zero() {
            TransactionKind::Defer
        } else {
            TransactionKind::Payment
        };

        let note = match (kind, note) {
            (TransactionKind::Defer, None) => Some(DEFAULT_DEFER_NOTE.to_string()),
            (_, note) => note,
        };

        if let Some(&index) = self.monthly.get(&ym) {
            let prior = self.transactions[index].amount;
            self.balance -= prior;
            let effective = self.apply_delta(delta);

            let row = &mut self.transactions[index];
            row.kind = kind;
            row.amount = effective;
            row.note = note;
            row.ts = Utc::now();
        } else {
            let effective = self.apply_delta(delta);
            let index = self.record(kind, effective, ym, note);
            self.monthly.insert(ym, index);
        }

        self.modified_at = Utc::now();
    }

    /// Changes the standard monthly installment.
    ///
    /// Records an informational INSTALLMENT_CHANGE row; when `apply_to_month`
    /// is set, the new installment is additionally recorded as the month's
    /// payment. Validation happens before any mutation, so the composition is
    /// all-or-nothing.
    ///
    /// # Errors
    /// `InvalidArgument` if the installment is not positive.
    pub fn change_installment(
        &mut self,
        installment: Decimal,
        ym: YearMonth,
        apply_to_month: bool,
        note: Option<String>,
    ) -> Result<(), LedgerError> {
        if installment <= Decimal::ZERO {
            return Err(LedgerError::invalid_argument(
                &self.emp_no,
                "monthly installment must be positive",
            ));
        }

        let note = note.or_else(|| Some(DEFAULT_INSTALLMENT_NOTE.to_string()));

        self.monthly_installment = installment;
        self.record(TransactionKind::InstallmentChange, Decimal::ZERO, ym, note.clone());

        if apply_to_month {
            self.set_payment(ym, installment, note);
        }

        Ok(())
    }

    /// Records the standard monthly deduction for `ym`, if the month is
    /// still open.
    ///
    /// A month that already carries a PAYMENT or DEFER row is left alone
    /// (an explicit deferral stands), as is a cleared account. The deduction
    /// never exceeds the remaining balance. Returns the amount deducted, if
    /// any, so repeated runs for the same month are no-ops.
    pub fn auto_deduct(&mut self, ym: YearMonth) -> Option<Decimal> {
        if self.balance <= Decimal::ZERO || self.monthly.contains_key(&ym) {
            return None;
        }

        let amount = self.balance.min(self.monthly_installment);
        self.set_payment(ym, amount, Some(AUTO_DEDUCTION_NOTE.to_string()));

        Some(amount)
    }

    /// Applies a single batch operation to an account slot.
    ///
    /// CREATE fills an empty slot and conflicts with an occupied one; every
    /// other kind requires the slot to be occupied. This is the shared
    /// dispatch used by both the batch actors and, indirectly, the tests.
    pub fn apply(slot: &mut Option<AdvanceAccount>, operation: &Operation) -> Result<(), LedgerError> {
        match operation.kind {
            OperationKind::Create => {
                if slot.is_some() {
                    return Err(LedgerError::already_exists(&operation.emp_no));
                }

                let account = AdvanceAccount::open(
                    operation.emp_no.clone(),
                    operation.parse_amount()?,
                    operation.parse_installment()?,
                    operation.posting_month()?,
                    operation.note.clone(),
                )?;

                *slot = Some(account);
                Ok(())
            }
            OperationKind::Topup => {
                let account = Self::existing(slot, &operation.emp_no)?;
                account.top_up(
                    operation.parse_amount()?,
                    operation.posting_month()?,
                    operation.note.clone(),
                )
            }
            OperationKind::Payment => {
                let account = Self::existing(slot, &operation.emp_no)?;
                let amount = operation.parse_amount()?;
                let ym = operation.posting_month()?;
                account.set_payment(ym, amount, operation.note.clone());
                Ok(())
            }
            OperationKind::Defer => {
                let account = Self::existing(slot, &operation.emp_no)?;
                let ym = operation.posting_month()?;
                account.set_payment(ym, Decimal::ZERO, operation.note.clone());
                Ok(())
            }
            OperationKind::Installment => {
                let account = Self::existing(slot, &operation.emp_no)?;
                account.change_installment(
                    operation.parse_installment()?,
                    operation.posting_month()?,
                    operation.apply.unwrap_or(false),
                    operation.note.clone(),
                )
            }
        }
    }

    /// The transaction log in append order (oldest first).
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn existing<'a>(
        slot: &'a mut Option<AdvanceAccount>,
        emp_no: &str,
    ) -> Result<&'a mut AdvanceAccount, LedgerError> {
        slot.as_mut().ok_or_else(|| LedgerError::not_found(emp_no))
    }

    /// Adds `delta` to the balance, clamping at zero, and returns the delta
    /// actually applied. The clamp covers the legitimate case of a final
    /// payment slightly exceeding the remainder.
    fn apply_delta(&mut self, delta: Decimal) -> Decimal {
        let effective = if self.balance + delta < Decimal::ZERO {
            -self.balance
        } else {
            delta
        };

        self.balance += effective;
        effective
    }

    fn record(
        &mut self,
        kind: TransactionKind,
        amount: Decimal,
        ym: YearMonth,
        note: Option<String>,
    ) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        self.modified_at = Utc::now();

        self.transactions.push(Transaction {
            id,
            ts: self.modified_at,
            kind,
            amount,
            ym,
            note,
        });

        self.transactions.len() - 1
    }
}
