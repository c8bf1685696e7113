//! This module defines the `InteractionLedger`, the single entry point for
//! every interaction an actor has with articles and comments.
//!
//! Operations are grouped by interaction kind in the submodules; this module
//! holds the shared lookups, view assembly and notification plumbing.
mod analytics;
mod articles;
mod bookmarks;
mod favorites;
mod highlights;
mod ratings;
mod reports;
mod votes;

use std::sync::Arc;

use haven_repository::HavenRepository;
use haven_shared::types::{
    ActorId, Article, ArticleView, Comment, CommentView, Notification, NotificationKind, Profile,
    Target, round_average,
};
use uuid::Uuid;

use crate::config::{LedgerConfig, RatingScope};
use crate::errors::LedgerError;
use crate::notifier::Notify;

pub use highlights::{HighlightOutcome, HighlightRequest};
pub use ratings::RatingChanges;
pub use votes::TargetRef;

const ARTICLE_NOT_FOUND: &str = "Article not found";
const COMMENT_NOT_FOUND: &str = "Comment not found";
const USER_NOT_FOUND: &str = "User not found";

/// `InteractionLedger` applies the interaction rules on top of a repository.
///
/// It is cheap to clone; clones share the repository and notifier.
#[derive(Clone)]
pub struct InteractionLedger {
    repository: Arc<dyn HavenRepository>,
    notifier: Arc<dyn Notify>,
    config: LedgerConfig,
}

impl InteractionLedger {
    /// Creates a new `InteractionLedger` instance.
    ///
    /// # Arguments
    ///
    /// * `repository` - Storage for every interaction record
    /// * `notifier` - Receiver of the events the ledger emits
    /// * `config` - Behavior switches
    ///
    /// # Returns
    ///
    /// A new `InteractionLedger` instance.
    pub fn new(
        repository: Arc<dyn HavenRepository>,
        notifier: Arc<dyn Notify>,
        config: LedgerConfig,
    ) -> Self {
        Self { repository, notifier, config }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Looks up an article by slug, failing with `NotFound(missing)`.
    async fn article_by_slug(&self, slug: &str, missing: &str) -> Result<Article, LedgerError> {
        self.repository
            .get_article_by_slug(slug)
            .await?
            .ok_or_else(|| LedgerError::not_found(missing))
    }

    /// Looks up a comment that must belong to `article`.
    async fn comment_of(&self, article: &Article, comment_id: Uuid) -> Result<Comment, LedgerError> {
        match self.repository.get_comment(comment_id).await? {
            Some(comment) if comment.article_id == article.id => Ok(comment),
            _ => Err(LedgerError::not_found(COMMENT_NOT_FOUND)),
        }
    }

    async fn profile_of(&self, actor_id: ActorId) -> Result<Profile, LedgerError> {
        self.repository
            .get_actor(actor_id)
            .await?
            .map(|actor| actor.profile())
            .ok_or_else(|| LedgerError::not_found(USER_NOT_FOUND))
    }

    async fn username_of(&self, actor_id: ActorId) -> Result<String, LedgerError> {
        Ok(self.profile_of(actor_id).await?.username)
    }

    /// Mean rating shown on an article, rounded to one decimal, `0.0` when unrated.
    pub async fn average_rating(&self, article_id: Uuid) -> Result<f64, LedgerError> {
        let scope = match self.config.rating_scope {
            RatingScope::Article => Some(article_id),
            RatingScope::Global => None,
        };
        let average = self.repository.average_rating(scope).await?;
        Ok(average.map(round_average).unwrap_or(0.0))
    }

    async fn article_view(&self, article: Article) -> Result<ArticleView, LedgerError> {
        let author = self.profile_of(article.author_id).await?;
        let votes = self.repository.count_votes(Target::Article(article.id)).await?;
        let average_rating = self.average_rating(article.id).await?;
        Ok(ArticleView {
            id: article.id,
            slug: article.slug,
            title: article.title,
            description: article.description,
            body: article.body,
            author,
            likes: votes.like_count,
            dislikes: votes.dislike_count,
            average_rating,
            created_at: article.created_at,
            updated_at: article.updated_at,
        })
    }

    async fn comment_view(&self, comment: Comment) -> Result<CommentView, LedgerError> {
        let author = self.profile_of(comment.author_id).await?;
        let votes = self.repository.count_votes(Target::Comment(comment.id)).await?;
        Ok(CommentView {
            id: comment.id,
            body: comment.body,
            author,
            parent_id: comment.parent_id,
            likes: votes.like_count,
            dislikes: votes.dislike_count,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }

    /// Hands an event to the notifier. Actors are never notified about their own actions.
    async fn emit(&self, kind: NotificationKind, recipient_id: ActorId, source_id: ActorId, object_id: Uuid) {
        if recipient_id == source_id {
            return;
        }
        let notification = Notification { kind, recipient_id, source_id, object_id };
        if let Err(e) = self.notifier.notify(notification).await {
            tracing::warn!(kind = kind.as_str(), recipient = %recipient_id, error = %e, "failed to emit notification");
        }
    }
}
