use super::{AdvanceStorage, Storage};
use crate::models::{AdvanceAccount, LedgerError};
use crate::types::YearMonth;
use anyhow::{Result, anyhow};
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

fn open_account(emp_no: &str, principal: i64) -> Result<AdvanceAccount> {
    Ok(AdvanceAccount::open(
        emp_no.to_string(),
        Decimal::from(principal),
        Decimal::from(500),
        YearMonth::from_str("2024-01")?,
        None,
    )?)
}

#[test]
fn test_storage_basic_checkout_and_checkin() -> Result<()> {
    let storage = AdvanceStorage::new();

    assert!(storage.load("E999").is_none());

    storage.save("E001".to_string(), open_account("E001", 100)?);

    let retrieved = storage
        .load("E001")
        .ok_or_else(|| anyhow!("Account not found in storage"))?;

    assert_eq!(retrieved.emp_no, "E001");
    assert_eq!(retrieved.balance, Decimal::from(100));

    // load is a checkout: the account is gone until saved back.
    assert!(storage.load("E001").is_none());

    Ok(())
}

#[test]
fn test_insert_new_rejects_duplicates_without_overwrite() -> Result<()> {
    let storage = AdvanceStorage::new();

    storage.insert_new(open_account("E001", 3000)?)?;

    let result = storage.insert_new(open_account("E001", 999)?);

    assert!(matches!(result, Err(LedgerError::AlreadyExists { .. })));

    let account = storage.get("E001").ok_or_else(|| anyhow!("Account missing"))?;

    assert_eq!(account.balance, Decimal::from(3000));

    Ok(())
}

#[test]
fn test_update_on_missing_account_fails() {
    let storage = AdvanceStorage::new();

    let result = storage.update("E404", |_| Ok(()));

    assert!(matches!(result, Err(LedgerError::NotFound { .. })));
}

#[test]
fn test_update_error_propagates_from_closure() -> Result<()> {
    let storage = AdvanceStorage::new();
    storage.insert_new(open_account("E001", 3000)?)?;

    let ym = YearMonth::from_str("2024-02")?;
    let result = storage.update("E001", |account| account.top_up(Decimal::ZERO, ym, None));

    assert!(matches!(result, Err(LedgerError::InvalidArgument { .. })));

    Ok(())
}

#[test]
fn test_concurrent_top_ups_on_one_account_all_apply() -> Result<()> {
    let storage = Arc::new(AdvanceStorage::new());
    storage.insert_new(open_account("E001", 1000)?)?;

    let mut handles = Vec::new();

    for _ in 0..8 {
        let storage = storage.clone();

        handles.push(thread::spawn(move || {
            for _ in 0..50 {
                storage
                    .update("E001", |account| {
                        let ym = YearMonth::from_str("2024-02").expect("valid month");
                        account.top_up(Decimal::from(10), ym, None)
                    })
                    .expect("top-up should succeed");
            }
        }));
    }

    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    let account = storage.get("E001").ok_or_else(|| anyhow!("Account missing"))?;

    // 1000 + 8 * 50 * 10, regardless of interleaving.
    assert_eq!(account.balance, Decimal::from(5000));

    Ok(())
}

#[test]
fn test_storage_iterator_collects_all_accounts() -> Result<()> {
    let storage = AdvanceStorage::new();
    storage.insert_new(open_account("E001", 100)?)?;
    storage.insert_new(open_account("E002", 200)?)?;
    storage.insert_new(open_account("E003", 300)?)?;

    assert_eq!(storage.iter().count(), 3);

    Ok(())
}
