//! Haven API Library
//!
//! HTTP surface of the interaction ledger: configuration from the
//! environment, dependency wiring, bearer-token authentication, error
//! rendering and the axum router.

pub mod auth;
pub mod config;
pub mod errors;
pub mod server;

pub use config::{AppConfig, Dependencies};
pub use errors::{ApiError, ConfigError, StartupError};
