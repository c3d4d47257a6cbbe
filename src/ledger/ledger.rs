use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    Account, AccountKind, BudgetBook, Displayable, Transaction, TransactionDraft,
};
use crate::errors::LedgerError;
use crate::ledger::budget::{budget_report, BudgetReport};
use crate::ledger::statement::{reconcile, reconstruct, StatementLine};
use crate::ledger::window::DateWindow;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The single owner of the full bookkeeping dataset.
///
/// Every mutation goes through [`Ledger::execute`]; read-side projections
/// (statements, reports, overviews) are recomputed on demand and never
/// touch state. Callers must serialize command execution themselves; the
/// ledger provides no locking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budgets: BudgetBook,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

/// Explicit mutation commands; the only way state changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LedgerCommand {
    ApplyTransaction(TransactionDraft),
    CreateAccount { name: String, kind: AccountKind },
    RenameAccount { id: Uuid, name: String },
    DeleteAccount { id: Uuid },
    SetBudgetLimit { category: String, limit_minor: i64 },
    RepairBalance { id: Uuid },
}

/// What a successfully executed command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    TransactionApplied { transaction_id: Uuid },
    AccountCreated { account_id: Uuid },
    AccountRenamed,
    AccountDeleted { removed_transactions: usize },
    BudgetLimitSet,
    BalanceRepaired { stored_minor: i64, reconstructed_minor: i64 },
}

/// Aggregate debit/credit position across all accounts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BalanceOverview {
    /// Sum of positive balances: what others owe the ledger owner.
    pub receivable_minor: i64,
    /// Magnitude of negative balances: what the owner owes others.
    pub payable_minor: i64,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            accounts: Vec::new(),
            transactions: Vec::new(),
            budgets: BudgetBook::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    /// Runs one mutation command against the dataset.
    pub fn execute(&mut self, command: LedgerCommand) -> Result<CommandOutcome, LedgerError> {
        match command {
            LedgerCommand::ApplyTransaction(draft) => {
                let transaction_id = self.apply_transaction_at(draft, Utc::now())?;
                Ok(CommandOutcome::TransactionApplied { transaction_id })
            }
            LedgerCommand::CreateAccount { name, kind } => {
                let account_id = self.add_account(Account::new(name, kind));
                Ok(CommandOutcome::AccountCreated { account_id })
            }
            LedgerCommand::RenameAccount { id, name } => {
                let account = self
                    .accounts
                    .iter_mut()
                    .find(|account| account.id == id)
                    .ok_or(LedgerError::UnknownAccount(id))?;
                account.name = name;
                self.touch();
                Ok(CommandOutcome::AccountRenamed)
            }
            LedgerCommand::DeleteAccount { id } => {
                let position = self
                    .accounts
                    .iter()
                    .position(|account| account.id == id)
                    .ok_or(LedgerError::UnknownAccount(id))?;
                let account = self.accounts.remove(position);
                let before = self.transactions.len();
                self.transactions.retain(|txn| txn.account_id != id);
                let removed_transactions = before - self.transactions.len();
                self.touch();
                info!(
                    account = %account.display_label(),
                    removed_transactions,
                    "account deleted with its entries"
                );
                Ok(CommandOutcome::AccountDeleted {
                    removed_transactions,
                })
            }
            LedgerCommand::SetBudgetLimit {
                category,
                limit_minor,
            } => {
                self.budgets.set_limit(category, limit_minor);
                self.touch();
                Ok(CommandOutcome::BudgetLimitSet)
            }
            LedgerCommand::RepairBalance { id } => {
                let lines = self.statement(id);
                let reconstructed_minor = lines
                    .last()
                    .map(|line| line.running_balance_minor)
                    .unwrap_or(0);
                let account = self
                    .accounts
                    .iter_mut()
                    .find(|account| account.id == id)
                    .ok_or(LedgerError::UnknownAccount(id))?;
                let stored_minor = account.balance_minor;
                // Sanctioned direct write: repair replaces the cached value
                // with the reconstruction.
                account.balance_minor = reconstructed_minor;
                self.touch();
                info!(%id, stored_minor, reconstructed_minor, "balance repaired");
                Ok(CommandOutcome::BalanceRepaired {
                    stored_minor,
                    reconstructed_minor,
                })
            }
        }
    }

    /// Validates, stamps, and applies a submitted transaction at `now`.
    pub fn apply_transaction_at(
        &mut self,
        draft: TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<Uuid, LedgerError> {
        validate_draft(&draft, &self.accounts)?;
        let transaction = draft.finalize(now);
        let position = self
            .accounts
            .iter()
            .position(|account| account.id == transaction.account_id)
            .ok_or(LedgerError::UnknownAccount(transaction.account_id))?;
        self.accounts[position] = apply_to_account(&self.accounts[position], &transaction);
        let id = transaction.id;
        debug!(
            transaction = %id,
            account = %self.accounts[position].display_label(),
            amount_minor = transaction.amount_minor,
            direction = ?transaction.direction,
            "transaction applied"
        );
        self.transactions.push(transaction);
        self.touch();
        Ok(id)
    }

    /// Reconstructs the account's full statement in chronological order.
    pub fn statement(&self, account_id: Uuid) -> Vec<StatementLine> {
        reconstruct(account_id, &self.transactions)
    }

    /// Verifies that the stored balance matches its reconstruction.
    ///
    /// Drift is returned as a recoverable error so callers can offer the
    /// repair command instead of failing hard.
    pub fn check_drift(&self, account_id: Uuid) -> Result<(), LedgerError> {
        let account = self
            .account(account_id)
            .ok_or(LedgerError::UnknownAccount(account_id))?;
        let lines = self.statement(account_id);
        match reconcile(account, &lines) {
            None => Ok(()),
            Some(drift) => {
                warn!(
                    account = %account.display_label(),
                    stored = drift.stored_minor,
                    reconstructed = drift.reconstructed_minor,
                    "balance drift detected"
                );
                Err(LedgerError::BalanceDrift {
                    account_id: drift.account_id,
                    stored_minor: drift.stored_minor,
                    reconstructed_minor: drift.reconstructed_minor,
                })
            }
        }
    }

    /// Builds the per-category budget report for a window.
    pub fn budget_report(&self, window: DateWindow) -> BudgetReport {
        budget_report(&self.transactions, &self.budgets, window)
    }

    /// All entries recorded on a calendar day, in timestamp order.
    pub fn daily_movement(&self, date: NaiveDate) -> Vec<&Transaction> {
        let window = DateWindow::single_day(date);
        let mut entries: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|txn| window.contains(txn.timestamp))
            .collect();
        entries.sort_by_key(|txn| txn.timestamp);
        entries
    }

    /// Totals of debit positions vs credit positions across accounts.
    pub fn balance_overview(&self) -> BalanceOverview {
        let mut overview = BalanceOverview::default();
        for account in &self.accounts {
            if account.balance_minor > 0 {
                overview.receivable_minor += account.balance_minor;
            } else {
                overview.payable_minor += account.balance_minor.abs();
            }
        }
        overview
    }

    /// Accounts sorted by most recent activity; untouched accounts last.
    pub fn accounts_by_recency(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.iter().collect();
        accounts.sort_by(|a, b| b.last_transaction.cmp(&a.last_transaction));
        accounts
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Rejects malformed submissions before any state changes.
///
/// Pure boundary check: a non-positive amount or an unknown account
/// reference never reaches the balance mutator.
pub fn validate_draft(draft: &TransactionDraft, accounts: &[Account]) -> Result<(), LedgerError> {
    if draft.amount_minor <= 0 {
        return Err(LedgerError::InvalidAmount(draft.amount_minor));
    }
    if !accounts.iter().any(|account| account.id == draft.account_id) {
        return Err(LedgerError::UnknownAccount(draft.account_id));
    }
    Ok(())
}

/// Applies one transaction's effect to its account and returns the updated
/// snapshot.
///
/// The only legal writer of `balance_minor` outside the repair command.
/// Callers replace the account with the returned value; nothing is patched
/// in place.
pub fn apply_to_account(account: &Account, transaction: &Transaction) -> Account {
    let mut updated = account.clone();
    updated.balance_minor += transaction.signed_amount_minor();
    updated.last_transaction = Some(transaction.timestamp);
    updated
}
