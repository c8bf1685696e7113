//! This module defines the `ArticlesRepository` trait, covering articles and the
//! comment threads attached to them.
use haven_shared::types::{Article, Comment};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for article and comment persistence.
///
/// Deleting an article or a comment removes everything attached to it:
/// replies, votes, ratings, favorites, bookmarks, highlights, reads and reports.
#[async_trait::async_trait]
pub trait ArticlesRepository: Send + Sync {
    /// Inserts a new article.
    ///
    /// # Arguments
    ///
    /// * `article` - The article to persist. Its slug must be unused.
    ///
    /// # Returns
    ///
    /// `RepositoryError::Conflict("slug")` if another article owns the slug.
    async fn insert_article(&self, article: &Article) -> Result<(), RepositoryError>;

    async fn get_article(&self, id: Uuid) -> Result<Option<Article>, RepositoryError>;

    async fn get_article_by_slug(&self, slug: &str) -> Result<Option<Article>, RepositoryError>;

    /// Returns `true` if any article owns `slug`.
    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError>;

    /// Overwrites slug, title, description, body and `updated_at` of an existing article.
    ///
    /// # Arguments
    ///
    /// * `article` - The article with its new fields.
    /// * `purge_highlights` - Also delete every highlight of the article, in the
    ///   same transaction as the update. Set when the body changed.
    ///
    /// # Returns
    ///
    /// The number of highlights removed, or `RepositoryError::Conflict("slug")`
    /// if the new slug belongs to another article.
    async fn update_article(&self, article: &Article, purge_highlights: bool) -> Result<u64, RepositoryError>;

    /// Deletes an article together with every interaction that references it.
    ///
    /// # Returns
    ///
    /// `true` if the article existed.
    async fn delete_article(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Lists all articles, newest first.
    async fn list_articles(&self) -> Result<Vec<Article>, RepositoryError>;

    async fn insert_comment(&self, comment: &Comment) -> Result<(), RepositoryError>;

    async fn get_comment(&self, id: Uuid) -> Result<Option<Comment>, RepositoryError>;

    async fn update_comment(&self, comment: &Comment) -> Result<(), RepositoryError>;

    /// Deletes a comment, its replies (transitively) and the votes cast on them.
    async fn delete_comment(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// Lists comments of an article, oldest first.
    ///
    /// # Arguments
    ///
    /// * `article_id` - The article whose thread is listed.
    /// * `parent_id` - `None` for top-level comments, `Some(id)` for replies to `id`.
    async fn list_comments(
        &self,
        article_id: Uuid,
        parent_id: Option<Uuid>,
    ) -> Result<Vec<Comment>, RepositoryError>;
}
