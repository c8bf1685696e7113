//! Error types for the repository.
//! Defines specific errors that can occur during storage operations.
use haven_shared::types::TargetKind;
use thiserror::Error;

/// Represents errors that can occur within the repository.
///
/// Unique-key violations are surfaced as [`RepositoryError::Conflict`] so the
/// ledger can treat them as the "already exists" branch instead of a failure.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Unique constraint violated: {0}")]
    Conflict(&'static str),

    /// The article or comment a write points at no longer exists.
    #[error("Target not found: {}", .0.as_str())]
    TargetNotFound(TargetKind),

    #[error("Invalid target kind: {0}")]
    InvalidTargetKind(i16),

    #[error("Invalid vote value: {0}")]
    InvalidVoteValue(i16),

    /// The row changed after the caller read it.
    #[error("{0} was modified concurrently")]
    Stale(&'static str),

    #[error("Gave up after concurrent writers kept changing {0}")]
    Contention(&'static str),
}

impl RepositoryError {
    /// Maps a unique violation to `Conflict(key)` and passes every other error through.
    pub(crate) fn unique(err: sqlx::Error, key: &'static str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::Conflict(key),
            _ => RepositoryError::DatabaseError(err),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::Conflict(_))
    }
}
