//! Error types for the haven repository.
//! Consolidates and re-exports error types related to storage operations.
mod repository;

pub use repository::RepositoryError;
