use chrono::{NaiveDate, TimeZone, Utc};
use ledger_core::{
    domain::{Account, AccountKind, Direction, TransactionDraft},
    ledger::{Ledger, LedgerCommand},
    storage::{JsonStorage, StorageBackend},
};

#[test]
fn ledger_round_trips_through_json_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();

    let mut ledger = Ledger::new("Shop Books");
    let id = ledger.add_account(
        Account::new("مقاول الكهرباء", AccountKind::Supplier).with_debt_limit(1_000_000),
    );
    let now = Utc.with_ymd_and_hms(2024, 10, 2, 13, 45, 0).unwrap();
    ledger
        .apply_transaction_at(
            TransactionDraft::new(id, 123_456_789, Direction::Debit)
                .with_category("كهرباء")
                .with_note("تمديدات")
                .on_date(NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()),
            now,
        )
        .unwrap();
    ledger
        .execute(LedgerCommand::SetBudgetLimit {
            category: "كهرباء".into(),
            limit_minor: 200_000_000,
        })
        .unwrap();

    storage.save(&ledger, "Shop Books").unwrap();
    let restored = storage.load("Shop Books").unwrap();

    // Monetary fields round-trip exactly; no lossy float encoding.
    assert_eq!(restored.accounts, ledger.accounts);
    assert_eq!(restored.transactions, ledger.transactions);
    assert_eq!(restored.budgets, ledger.budgets);
    assert_eq!(
        restored.account(id).unwrap().balance_minor,
        123_456_789
    );

    // The restored snapshot still reconciles.
    assert!(restored.check_drift(id).is_ok());
}

#[test]
fn save_overwrites_previous_checkpoint() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();

    let mut ledger = Ledger::new("books");
    let id = ledger.add_account(Account::new("صندوق", AccountKind::Cash));
    storage.save(&ledger, "books").unwrap();

    ledger
        .execute(LedgerCommand::ApplyTransaction(TransactionDraft::new(
            id,
            777,
            Direction::Debit,
        )))
        .unwrap();
    storage.save(&ledger, "books").unwrap();

    let restored = storage.load("books").unwrap();
    assert_eq!(restored.transaction_count(), 1);
    assert_eq!(restored.account(id).unwrap().balance_minor, 777);
}

#[test]
fn missing_checkpoint_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let storage = JsonStorage::new(dir.path()).unwrap();
    let err = storage.load("nothing_here").unwrap_err();
    assert!(matches!(err, ledger_core::errors::LedgerError::Io(_)));
}
