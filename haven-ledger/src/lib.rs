//! # Haven Ledger
//! This crate holds the interaction ledger of Authors Haven: the rules that
//! decide whether a vote, rating, favorite, bookmark, highlight, comment, read
//! or report is created, toggled, rejected or removed.
//! It includes the ledger itself, access checks, the notification seam and
//! error handling.
pub mod access;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod notifier;

pub use config::{LedgerConfig, RatingScope};
pub use errors::{ForbiddenReason, LedgerError};
pub use ledger::{
    HighlightOutcome, HighlightRequest, InteractionLedger, RatingChanges, TargetRef,
};
pub use notifier::{ChannelNotifier, Notify, NotifyError, TracingNotifier};
