//! Error types for the interaction ledger.
mod ledger;

pub use ledger::{ForbiddenReason, LedgerError};
