//! Error types returned by ledger operations.
//! Messages are the ones shown to API clients.
use haven_repository::RepositoryError;
use thiserror::Error;

/// Represents errors that can occur within the interaction ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness rule rejected the interaction.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Forbidden(ForbiddenReason),

    #[error("{0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl LedgerError {
    pub(crate) fn not_found(message: &str) -> Self {
        LedgerError::NotFound(message.to_string())
    }

    pub(crate) fn conflict(message: &str) -> Self {
        LedgerError::Conflict(message.to_string())
    }

    pub(crate) fn validation(message: &str) -> Self {
        LedgerError::Validation(message.to_string())
    }
}

/// Why an actor may not perform an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForbiddenReason {
    #[error("Authentication credentials were not provided.")]
    Unauthenticated,

    #[error(
        "The email linked to your account has not been verified. Please verify your account using the email verification link if you would like to enjoy all our features."
    )]
    Unverified,

    #[error("You do not have permission to perform this action.")]
    NotOwner,

    /// The actor tried to rate or report an article they wrote.
    #[error("{0}")]
    OwnArticle(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_client_facing() {
        let err = LedgerError::Forbidden(ForbiddenReason::OwnArticle("cannot rate own article"));
        assert_eq!(err.to_string(), "cannot rate own article");

        let err = LedgerError::from(RepositoryError::Conflict("slug"));
        assert_eq!(err.to_string(), "Repository error: Unique constraint violated: slug");
    }
}
