pub mod json_backend;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over the opaque store the engine checkpoints to.
///
/// The engine operates purely on in-memory state; backends decide when and
/// how writes become durable.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &Ledger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Ledger>;
}

pub use json_backend::JsonStorage;
