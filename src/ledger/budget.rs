//! Period aggregation of debit spend and its comparison against the
//! per-category approved limits.

use serde::{Deserialize, Serialize};

use crate::domain::{BudgetBook, Direction, Transaction, BUDGET_CATEGORIES, MAINTENANCE_CATEGORY};
use crate::ledger::window::DateWindow;

/// Debit spend for one category: bounded by the report window, and lifetime.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategorySpend {
    pub spent_in_period_minor: i64,
    pub total_spent_minor: i64,
}

/// Sums debit amounts for `category` over the full log and within `window`.
///
/// Pure and recomputed on every call; entries without a category count under
/// the general sentinel. Credits never contribute to spend.
pub fn aggregate(transactions: &[Transaction], category: &str, window: DateWindow) -> CategorySpend {
    let mut spend = CategorySpend::default();
    for txn in transactions {
        if txn.direction != Direction::Debit || txn.category_label() != category {
            continue;
        }
        spend.total_spent_minor += txn.amount_minor;
        if window.contains(txn.timestamp) {
            spend.spent_in_period_minor += txn.amount_minor;
        }
    }
    spend
}

/// Classification of a category's spend against its approved limit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BudgetStatus {
    Safe,
    Approaching,
    Exceeded,
}

impl BudgetStatus {
    /// `Exceeded` when spend passed the limit, `Approaching` from 80% usage
    /// upward. A zero limit means no budget is configured, so the usage
    /// ratio is never computed and the status stays `Safe`.
    pub fn classify(total_spent_minor: i64, approved_limit_minor: i64) -> Self {
        if approved_limit_minor - total_spent_minor < 0 {
            BudgetStatus::Exceeded
        } else if approved_limit_minor > 0 && total_spent_minor * 10 >= approved_limit_minor * 8 {
            BudgetStatus::Approaching
        } else {
            BudgetStatus::Safe
        }
    }
}

/// One budget report row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetLine {
    pub category: String,
    pub spend: CategorySpend,
    pub approved_minor: i64,
    pub remaining_minor: i64,
    pub status: BudgetStatus,
}

/// Compares aggregated spend against the approved limit for one category.
pub fn evaluate(
    category: impl Into<String>,
    spend: CategorySpend,
    approved_minor: i64,
) -> BudgetLine {
    BudgetLine {
        category: category.into(),
        spend,
        approved_minor,
        remaining_minor: approved_minor - spend.total_spent_minor,
        status: BudgetStatus::classify(spend.total_spent_minor, approved_minor),
    }
}

/// Grand totals over the report lines, excluding the maintenance category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportTotals {
    pub spent_in_period_minor: i64,
    pub total_spent_minor: i64,
    pub approved_minor: i64,
    pub remaining_minor: i64,
}

impl ReportTotals {
    pub fn exceeded(&self) -> bool {
        self.remaining_minor < 0
    }

    fn add(&mut self, line: &BudgetLine) {
        self.spent_in_period_minor += line.spend.spent_in_period_minor;
        self.total_spent_minor += line.spend.total_spent_minor;
        self.approved_minor += line.approved_minor;
        self.remaining_minor += line.remaining_minor;
    }
}

/// The full per-period budget report.
///
/// Maintenance gets its own line below the grand total instead of rolling
/// into it; the general sentinel category never appears at all.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BudgetReport {
    pub window: DateWindow,
    pub lines: Vec<BudgetLine>,
    pub totals: ReportTotals,
    pub maintenance: BudgetLine,
}

/// Builds the report over the fixed category list for the given window.
pub fn budget_report(
    transactions: &[Transaction],
    budgets: &BudgetBook,
    window: DateWindow,
) -> BudgetReport {
    let mut lines = Vec::with_capacity(BUDGET_CATEGORIES.len() - 1);
    let mut totals = ReportTotals::default();
    let mut maintenance = None;

    for category in BUDGET_CATEGORIES {
        let spend = aggregate(transactions, category, window);
        let line = evaluate(category, spend, budgets.limit_for(category));
        if category == MAINTENANCE_CATEGORY {
            maintenance = Some(line);
        } else {
            totals.add(&line);
            lines.push(line);
        }
    }

    BudgetReport {
        window,
        lines,
        totals,
        // The fixed category list always carries the maintenance entry.
        maintenance: maintenance.expect("maintenance category present in fixed list"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, GENERAL_CATEGORY};
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn debit(category: Option<&str>, amount_minor: i64, month: u32, day: u32) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            account_id: Uuid::new_v4(),
            amount_minor,
            direction: Direction::Debit,
            timestamp: Utc.with_ymd_and_hms(2024, month, day, 10, 30, 0).unwrap(),
            category: category.map(str::to_owned),
            note: String::new(),
            method: PaymentMethod::Cash,
        }
    }

    fn february() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 28).unwrap(),
        )
    }

    #[test]
    fn period_bound_excludes_other_months_from_period_only() {
        let log = vec![
            debit(Some("كهرباء"), 3_000, 1, 15),
            debit(Some("كهرباء"), 2_000, 2, 10),
        ];
        let spend = aggregate(&log, "كهرباء", february());
        assert_eq!(spend.spent_in_period_minor, 2_000);
        assert_eq!(spend.total_spent_minor, 5_000);
    }

    #[test]
    fn end_date_includes_the_whole_day() {
        let late = debit(Some("مياه"), 700, 2, 28);
        let spend = aggregate(&[late], "مياه", february());
        assert_eq!(spend.spent_in_period_minor, 700);
    }

    #[test]
    fn credits_never_count_as_spend() {
        let mut refund = debit(Some("مياه"), 700, 2, 10);
        refund.direction = Direction::Credit;
        let spend = aggregate(&[refund], "مياه", february());
        assert_eq!(spend.total_spent_minor, 0);
    }

    #[test]
    fn uncategorized_entries_fall_under_general() {
        let log = vec![debit(None, 900, 2, 5)];
        let spend = aggregate(&log, GENERAL_CATEGORY, february());
        assert_eq!(spend.total_spent_minor, 900);
        assert_eq!(aggregate(&log, "مياه", february()).total_spent_minor, 0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let log = vec![
            debit(Some("اتصالات"), 1_500, 2, 3),
            debit(Some("اتصالات"), 2_500, 2, 20),
        ];
        let first = aggregate(&log, "اتصالات", february());
        let second = aggregate(&log, "اتصالات", february());
        assert_eq!(first, second);
    }

    #[test]
    fn status_boundaries_at_eighty_percent() {
        assert_eq!(BudgetStatus::classify(799, 1_000), BudgetStatus::Safe);
        assert_eq!(BudgetStatus::classify(800, 1_000), BudgetStatus::Approaching);
        assert_eq!(BudgetStatus::classify(1_001, 1_000), BudgetStatus::Exceeded);
    }

    #[test]
    fn zero_limit_means_no_budget_configured() {
        assert_eq!(BudgetStatus::classify(0, 0), BudgetStatus::Safe);
        assert_eq!(BudgetStatus::classify(5_000, 0), BudgetStatus::Exceeded);
    }

    #[test]
    fn maintenance_stays_out_of_grand_totals() {
        let log = vec![
            debit(Some(MAINTENANCE_CATEGORY), 10_000, 2, 4),
            debit(Some("قرطاسية"), 4_000, 2, 6),
        ];
        let mut budgets = BudgetBook::new();
        budgets.set_limit(MAINTENANCE_CATEGORY, 20_000);
        budgets.set_limit("قرطاسية", 5_000);

        let report = budget_report(&log, &budgets, february());
        assert_eq!(report.totals.total_spent_minor, 4_000);
        assert_eq!(report.totals.approved_minor, 5_000);
        assert_eq!(report.maintenance.spend.total_spent_minor, 10_000);
        assert_eq!(report.maintenance.status, BudgetStatus::Approaching);
        assert!(report
            .lines
            .iter()
            .all(|line| line.category != MAINTENANCE_CATEGORY));
    }
}
