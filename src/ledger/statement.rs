//! Statement reconstruction: restores chronological order over an account's
//! entries and recomputes the running balance from scratch.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Account, Transaction};
use crate::ledger::window::DateWindow;

/// One statement row: a transaction annotated with the balance *after*
/// applying it and its 1-based chronological position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatementLine {
    pub transaction: Transaction,
    pub running_balance_minor: i64,
    pub index: usize,
}

/// Disagreement between a stored balance and its reconstruction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceDrift {
    pub account_id: Uuid,
    pub stored_minor: i64,
    pub reconstructed_minor: i64,
}

/// Rebuilds an account's statement purely from the transaction log.
///
/// Entries are filtered to the account, stably sorted by timestamp (equal
/// timestamps keep insertion order), then folded from zero. The cached
/// account balance is deliberately not consulted, so the result stays
/// auditable on its own.
pub fn reconstruct(account_id: Uuid, transactions: &[Transaction]) -> Vec<StatementLine> {
    let mut entries: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| txn.account_id == account_id)
        .collect();
    entries.sort_by_key(|txn| txn.timestamp);

    let mut running = 0i64;
    entries
        .into_iter()
        .enumerate()
        .map(|(position, txn)| {
            running += txn.signed_amount_minor();
            StatementLine {
                transaction: txn.clone(),
                running_balance_minor: running,
                index: position + 1,
            }
        })
        .collect()
}

/// Re-sorts annotated lines most-recent-first for display. Running balances
/// were fixed at fold time and do not change with display order.
pub fn display_newest_first(mut lines: Vec<StatementLine>) -> Vec<StatementLine> {
    lines.sort_by(|a, b| b.transaction.timestamp.cmp(&a.transaction.timestamp));
    lines
}

/// Restricts annotated lines to a date window, keeping their annotations.
pub fn window_lines(lines: &[StatementLine], window: DateWindow) -> Vec<StatementLine> {
    lines
        .iter()
        .filter(|line| window.contains(line.transaction.timestamp))
        .cloned()
        .collect()
}

/// Compares the reconstruction against the stored balance. An empty
/// statement implies a zero balance; anything else is drift.
pub fn reconcile(account: &Account, lines: &[StatementLine]) -> Option<BalanceDrift> {
    let reconstructed = lines
        .last()
        .map(|line| line.running_balance_minor)
        .unwrap_or(0);
    if reconstructed == account.balance_minor {
        None
    } else {
        Some(BalanceDrift {
            account_id: account.id,
            stored_minor: account.balance_minor,
            reconstructed_minor: reconstructed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountKind, Direction, PaymentMethod};
    use chrono::{TimeZone, Utc};

    fn entry(
        account_id: Uuid,
        amount_minor: i64,
        direction: Direction,
        day: u32,
        hour: u32,
    ) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            account_id,
            amount_minor,
            direction,
            timestamp: Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap(),
            category: None,
            note: String::new(),
            method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn fold_restores_timestamp_order() {
        let account_id = Uuid::new_v4();
        // Inserted out of order on purpose.
        let log = vec![
            entry(account_id, 200, Direction::Credit, 2, 10),
            entry(account_id, 500, Direction::Debit, 1, 9),
        ];
        let lines = reconstruct(account_id, &log);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].running_balance_minor, 500);
        assert_eq!(lines[1].running_balance_minor, 300);
        assert_eq!(lines[0].index, 1);
        assert_eq!(lines[1].index, 2);
    }

    #[test]
    fn equal_timestamps_keep_insertion_order() {
        let account_id = Uuid::new_v4();
        let first = entry(account_id, 100, Direction::Debit, 1, 12);
        let mut second = entry(account_id, 40, Direction::Credit, 1, 12);
        second.timestamp = first.timestamp;
        let first_id = first.id;
        let lines = reconstruct(account_id, &[first, second]);
        assert_eq!(lines[0].transaction.id, first_id);
        assert_eq!(lines[1].running_balance_minor, 60);
    }

    #[test]
    fn other_accounts_are_filtered_out() {
        let account_id = Uuid::new_v4();
        let log = vec![
            entry(account_id, 100, Direction::Debit, 1, 8),
            entry(Uuid::new_v4(), 999, Direction::Debit, 1, 9),
        ];
        let lines = reconstruct(account_id, &log);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].running_balance_minor, 100);
    }

    #[test]
    fn display_order_does_not_touch_running_balances() {
        let account_id = Uuid::new_v4();
        let log = vec![
            entry(account_id, 500, Direction::Debit, 1, 9),
            entry(account_id, 200, Direction::Credit, 2, 10),
        ];
        let lines = reconstruct(account_id, &log);
        let newest_first = display_newest_first(lines.clone());
        assert_eq!(newest_first[0].transaction.id, lines[1].transaction.id);
        assert_eq!(newest_first[0].running_balance_minor, 300);
        assert_eq!(newest_first[1].running_balance_minor, 500);
    }

    #[test]
    fn empty_statement_reconciles_only_with_zero_balance() {
        let mut account = Account::new("فلان", AccountKind::Customer);
        assert!(reconcile(&account, &[]).is_none());
        account.balance_minor = 750;
        let drift = reconcile(&account, &[]).expect("drift expected");
        assert_eq!(drift.stored_minor, 750);
        assert_eq!(drift.reconstructed_minor, 0);
    }
}
