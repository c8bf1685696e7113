//! This module defines the `HighlightsRepository` trait.
use haven_shared::types::{ActorId, Highlight, HighlightToggle, NewHighlight};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// A trait that defines the interface for highlight persistence.
///
/// A highlight is identified by `(actor, article, start_index, end_index)`.
#[async_trait::async_trait]
pub trait HighlightsRepository: Send + Sync {
    /// Adds the highlight if the range is not highlighted by the actor yet,
    /// removes the existing one otherwise. Decided atomically.
    ///
    /// # Arguments
    ///
    /// * `highlight` - The submitted range. Bounds are validated by the caller
    ///   against the article version carried in `article_version`.
    ///
    /// # Returns
    ///
    /// `HighlightToggle::Added` with the stored highlight, or `HighlightToggle::Removed`.
    /// `RepositoryError::Stale("article")` if the article was edited since that
    /// version, `RepositoryError::TargetNotFound` if it was deleted.
    async fn toggle_highlight(&self, highlight: &NewHighlight) -> Result<HighlightToggle, RepositoryError>;

    async fn get_highlight(&self, id: Uuid) -> Result<Option<Highlight>, RepositoryError>;

    /// Overwrites comment, privacy and `updated_at`.
    async fn update_highlight(&self, highlight: &Highlight) -> Result<(), RepositoryError>;

    /// Highlights made by `actor_id`, optionally restricted to one article.
    async fn list_highlights(
        &self,
        actor_id: ActorId,
        article_id: Option<Uuid>,
    ) -> Result<Vec<Highlight>, RepositoryError>;

    /// Non-private highlights of an article from every actor.
    async fn list_public_highlights(&self, article_id: Uuid) -> Result<Vec<Highlight>, RepositoryError>;
}
