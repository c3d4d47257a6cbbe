pub mod account;
pub mod category;
pub mod common;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use category::{
    is_budget_category, BudgetBook, BUDGET_CATEGORIES, GENERAL_CATEGORY, MAINTENANCE_CATEGORY,
};
pub use common::{Displayable, Identifiable, NamedEntity};
pub use transaction::{
    finalize_timestamp, Direction, PaymentMethod, Transaction, TransactionDraft,
};
