use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// A named ledger subject holding a running balance.
///
/// Balances are integer minor currency units. A positive balance means the
/// account owes the ledger owner (debit position); a negative balance means
/// the owner owes the account (credit position).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub balance_minor: i64,
    pub kind: AccountKind,
    /// Instant of the most recently applied transaction. Recency sort only;
    /// statement reconstruction never reads it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transaction: Option<DateTime<Utc>>,
    /// Advisory flag. The engine preserves it through every mutation but
    /// does not enforce it.
    #[serde(default)]
    pub is_locked: bool,
    /// Advisory ceiling on the debit position; never enforced here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debt_limit_minor: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            balance_minor: 0,
            kind,
            last_transaction: None,
            is_locked: false,
            debt_limit_minor: None,
            notes: None,
        }
    }

    pub fn with_debt_limit(mut self, limit_minor: i64) -> Self {
        self.debt_limit_minor = Some(limit_minor);
        self
    }

    /// True when the account owes the ledger owner.
    pub fn is_debit_position(&self) -> bool {
        self.balance_minor >= 0
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        format!("{} ({:?})", self.name, self.kind)
    }
}

/// Enumerates the supported account classifications.
///
/// Purely classificatory: the role never affects balance arithmetic.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    Customer,
    Supplier,
    Employee,
    Expense,
    Debt,
    Other,
    Cash,
}
