//! This module defines the `FavoritesRepository` trait.
use haven_shared::types::{ActorId, Article, Favorite};
use uuid::Uuid;

use crate::errors::RepositoryError;

#[async_trait::async_trait]
pub trait FavoritesRepository: Send + Sync {
    /// Inserts a favorite; `Conflict("favorite")` if the pair already exists.
    async fn insert_favorite(&self, favorite: &Favorite) -> Result<(), RepositoryError>;

    async fn get_favorite(
        &self,
        actor_id: ActorId,
        article_id: Uuid,
    ) -> Result<Option<Favorite>, RepositoryError>;

    async fn delete_favorite(&self, actor_id: ActorId, article_id: Uuid) -> Result<bool, RepositoryError>;

    /// Articles favorited by `actor_id`, most recently favorited first.
    async fn list_favorite_articles(&self, actor_id: ActorId) -> Result<Vec<Article>, RepositoryError>;

    /// Actors who favorited `article_id`.
    async fn list_favoriters(&self, article_id: Uuid) -> Result<Vec<ActorId>, RepositoryError>;
}
