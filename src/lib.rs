#![doc(test(attr(deny(warnings))))]

//! Ledger Core provides the account/transaction data model, balance
//! invariants, statement reconstruction, and budget aggregation that power
//! a single-sided bookkeeping application.

pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
