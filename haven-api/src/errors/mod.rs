//! Error types for the Haven API.
//! `ApiError` turns ledger failures into HTTP responses, while `ConfigError`
//! and `StartupError` cover everything that can stop the binary before it
//! starts serving.
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use haven_ledger::{ForbiddenReason, LedgerError};
use haven_repository::RepositoryError;
use serde_json::json;
use tracing::error;
use tracing_subscriber::util::TryInitError;

/// A missing or malformed environment setting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Errors that abort startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Tracing error: {0}")]
    Tracing(#[from] TryInitError),
}

/// Errors returned by request handlers, rendered as `{"errors": <message>}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    /// The request body, path or query is malformed or lacks a field the
    /// operation needs.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub(crate) fn unauthenticated() -> Self {
        ApiError::Ledger(LedgerError::Forbidden(ForbiddenReason::Unauthenticated))
    }

    /// Maps the error to its HTTP status.
    ///
    /// Duplicate interactions answer 400 rather than 409, and rating or
    /// reporting one's own article answers 400 rather than 403.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Ledger(LedgerError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Ledger(LedgerError::Conflict(_)) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(LedgerError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Ledger(LedgerError::Forbidden(ForbiddenReason::OwnArticle(_))) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Ledger(LedgerError::Forbidden(_)) => StatusCode::FORBIDDEN,
            ApiError::Ledger(LedgerError::Repository(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Ledger(LedgerError::Repository(err)) => {
                error!(error = %err, "Request failed in the repository");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "errors": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (LedgerError::NotFound("Article not found".into()), StatusCode::NOT_FOUND),
            (LedgerError::Conflict("Article already in favorites.".into()), StatusCode::BAD_REQUEST),
            (LedgerError::Validation("please keep range of rating from 1-5".into()), StatusCode::BAD_REQUEST),
            (LedgerError::Forbidden(ForbiddenReason::Unverified), StatusCode::FORBIDDEN),
            (LedgerError::Forbidden(ForbiddenReason::NotOwner), StatusCode::FORBIDDEN),
            (
                LedgerError::Forbidden(ForbiddenReason::OwnArticle("cannot rate own article")),
                StatusCode::BAD_REQUEST,
            ),
            (
                LedgerError::Repository(RepositoryError::Contention("votes")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status(), status);
        }
    }

    #[test]
    fn test_unauthenticated_is_forbidden() {
        let err = ApiError::unauthenticated();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.to_string(), "Authentication credentials were not provided.");
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(ConfigError::Missing("JWT_SECRET").to_string(), "JWT_SECRET must be set");
        let err = ConfigError::Invalid { name: "HAVEN_PORT", value: "eighty".into() };
        assert_eq!(err.to_string(), "HAVEN_PORT has an invalid value: eighty");
    }
}
