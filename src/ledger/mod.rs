//! Ledger engine: the command funnel, statement reconstruction, and
//! budget/period aggregation over the in-memory dataset.

pub mod budget;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod statement;
pub mod window;

pub use budget::{
    aggregate, budget_report, evaluate, BudgetLine, BudgetReport, BudgetStatus, CategorySpend,
    ReportTotals,
};
pub use ledger::{
    apply_to_account, validate_draft, BalanceOverview, CommandOutcome, Ledger, LedgerCommand,
};
pub use statement::{
    display_newest_first, reconcile, reconstruct, window_lines, BalanceDrift, StatementLine,
};
pub use window::DateWindow;
