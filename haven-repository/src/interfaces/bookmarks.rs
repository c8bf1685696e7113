//! This module defines the `BookmarksRepository` trait.
use haven_shared::types::{ActorId, Bookmark};
use uuid::Uuid;

use crate::errors::RepositoryError;

#[async_trait::async_trait]
pub trait BookmarksRepository: Send + Sync {
    /// Inserts a bookmark; `Conflict("bookmark")` if the actor already bookmarked the article.
    async fn insert_bookmark(&self, bookmark: &Bookmark) -> Result<(), RepositoryError>;

    async fn get_bookmark(&self, id: Uuid) -> Result<Option<Bookmark>, RepositoryError>;

    async fn delete_bookmark(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Bookmarks owned by `actor_id`, newest first.
    async fn list_bookmarks(&self, actor_id: ActorId) -> Result<Vec<Bookmark>, RepositoryError>;
}
