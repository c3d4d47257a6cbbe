use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::GENERAL_CATEGORY;
use crate::domain::common::Identifiable;

/// A single signed monetary entry against one account.
///
/// `amount_minor` is always strictly positive; the sign of the effect on the
/// owning balance is carried by `direction` alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Transaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount_minor: i64,
    pub direction: Direction,
    /// Sole ordering key for statement reconstruction. Entries sharing an
    /// instant keep their insertion order.
    pub timestamp: DateTime<Utc>,
    /// `None` stands for the general category, which is tracked but never
    /// budget-compared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub method: PaymentMethod,
}

impl Transaction {
    /// The category label used for aggregation, falling back to the
    /// general sentinel.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(GENERAL_CATEGORY)
    }

    /// The balance delta this entry contributes to its account.
    pub fn signed_amount_minor(&self) -> i64 {
        self.direction.signed(self.amount_minor)
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Direction of a ledger entry relative to the owning account's balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    /// Increases the owning account's balance.
    Debit,
    /// Decreases the owning account's balance.
    Credit,
}

impl Direction {
    pub fn signed(self, amount_minor: i64) -> i64 {
        match self {
            Direction::Debit => amount_minor,
            Direction::Credit => -amount_minor,
        }
    }
}

/// Settlement method recorded on an entry. Classificatory only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Deferred,
}

/// A user-submitted transaction before id and timestamp assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub account_id: Uuid,
    pub amount_minor: i64,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub method: PaymentMethod,
    /// Calendar date chosen on the entry form.
    pub value_date: NaiveDate,
}

impl TransactionDraft {
    pub fn new(account_id: Uuid, amount_minor: i64, direction: Direction) -> Self {
        Self {
            account_id,
            amount_minor,
            direction,
            category: None,
            note: String::new(),
            method: PaymentMethod::default(),
            value_date: Utc::now().date_naive(),
        }
    }

    /// Draft for the one-time synthetic entry that seeds an account created
    /// with a non-zero starting position.
    pub fn opening_balance(account_id: Uuid, amount_minor: i64, direction: Direction) -> Self {
        Self::new(account_id, amount_minor, direction).with_note("رصيد افتتاحي")
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn on_date(mut self, value_date: NaiveDate) -> Self {
        self.value_date = value_date;
        self
    }

    /// Promotes the draft into a full transaction, assigning its id and
    /// final timestamp relative to `now`.
    pub fn finalize(self, now: DateTime<Utc>) -> Transaction {
        Transaction {
            id: Uuid::new_v4(),
            account_id: self.account_id,
            amount_minor: self.amount_minor,
            direction: self.direction,
            timestamp: finalize_timestamp(self.value_date, now),
            category: self.category,
            note: self.note,
            method: self.method,
        }
    }
}

/// Resolves the record instant for a chosen calendar date.
///
/// A draft dated today receives the live clock time so same-day entries keep
/// their true chronological order; any other date gets midnight.
pub fn finalize_timestamp(value_date: NaiveDate, now: DateTime<Utc>) -> DateTime<Utc> {
    if value_date == now.date_naive() {
        now
    } else {
        value_date
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid time")
            .and_utc()
    }
}
