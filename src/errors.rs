use thiserror::Error;
use uuid::Uuid;

/// Error type that captures common ledger failures.
///
/// Every engine fault is local and recoverable; a rejected form entry must
/// never take down the session, so nothing here panics.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A submitted transaction carried a zero or negative amount.
    #[error("transaction amount must be positive, got {0}")]
    InvalidAmount(i64),
    /// A submitted transaction referenced an account that does not exist.
    #[error("unknown account: {0}")]
    UnknownAccount(Uuid),
    /// The stored balance disagrees with the from-scratch reconstruction.
    /// Soft condition: callers should offer a repair, not abort.
    #[error(
        "balance drift on account {account_id}: stored {stored_minor}, reconstructed {reconstructed_minor}"
    )]
    BalanceDrift {
        account_id: Uuid,
        stored_minor: i64,
        reconstructed_minor: i64,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
