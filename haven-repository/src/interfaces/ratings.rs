//! This module defines the `RatingsRepository` trait.
use haven_shared::types::Rating;
use uuid::Uuid;

use crate::errors::RepositoryError;

#[async_trait::async_trait]
pub trait RatingsRepository: Send + Sync {
    /// Inserts a rating.
    ///
    /// # Returns
    ///
    /// `RepositoryError::Conflict("rating")` if the author already rated the article.
    async fn insert_rating(&self, rating: &Rating) -> Result<(), RepositoryError>;

    async fn get_rating(&self, id: Uuid) -> Result<Option<Rating>, RepositoryError>;

    /// Overwrites value, review and `updated_at`.
    async fn update_rating(&self, rating: &Rating) -> Result<(), RepositoryError>;

    async fn delete_rating(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Lists ratings of an article, newest first.
    async fn list_ratings(&self, article_id: Uuid) -> Result<Vec<Rating>, RepositoryError>;

    /// Arithmetic mean of rating values.
    ///
    /// # Arguments
    ///
    /// * `article_id` - `Some(id)` to average one article, `None` to average every rating.
    ///
    /// # Returns
    ///
    /// `None` when no rating is in scope.
    async fn average_rating(&self, article_id: Option<Uuid>) -> Result<Option<f64>, RepositoryError>;
}
