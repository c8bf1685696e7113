//! Favorites: one per actor and article.
use chrono::Utc;
use haven_repository::RepositoryError;
use haven_shared::types::{Actor, ArticleView, Favorite, FavoriteView};
use uuid::Uuid;

use super::InteractionLedger;
use crate::access::ensure_verified;
use crate::errors::LedgerError;

const ARTICLE_MISSING: &str = "This article has not been found.";
const ALREADY_FAVORITE: &str = "Article already in favorites.";
const ADDED: &str = "Article added to favorites.";
const REMOVED: &str = "Article removed from favorites";
const NOT_FAVORITE: &str = "Article not favorite";
const NOT_FAVORITED: &str = "Article not favorited";

impl InteractionLedger {
    /// Adds an article to the actor's favorites.
    ///
    /// # Returns
    ///
    /// The stored favorite with a confirmation message, or `Conflict` if the
    /// article is already a favorite.
    pub async fn add_favorite(&self, actor: &Actor, slug: &str) -> Result<FavoriteView, LedgerError> {
        ensure_verified(actor)?;
        let article = self.article_by_slug(slug, ARTICLE_MISSING).await?;

        let favorite = Favorite {
            id: Uuid::new_v4(),
            actor_id: actor.id,
            article_id: article.id,
            created_at: Utc::now(),
        };
        match self.repository.insert_favorite(&favorite).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => return Err(LedgerError::conflict(ALREADY_FAVORITE)),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(actor = %actor.id, article = %article.id, "article favorited");

        Ok(FavoriteView {
            message: ADDED.to_string(),
            id: favorite.id,
            user_id: favorite.actor_id,
            article_id: favorite.article_id,
        })
    }

    /// Removes an article from the actor's favorites and returns a confirmation message.
    pub async fn remove_favorite(&self, actor: &Actor, slug: &str) -> Result<&'static str, LedgerError> {
        ensure_verified(actor)?;
        let article = self.article_by_slug(slug, ARTICLE_MISSING).await?;
        if !self.repository.delete_favorite(actor.id, article.id).await? {
            return Err(LedgerError::not_found(NOT_FAVORITE));
        }
        tracing::info!(actor = %actor.id, article = %article.id, "favorite removed");
        Ok(REMOVED)
    }

    /// Returns the article if the actor has favorited it.
    pub async fn get_favorite(&self, actor: &Actor, slug: &str) -> Result<ArticleView, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_MISSING).await?;
        if self.repository.get_favorite(actor.id, article.id).await?.is_none() {
            return Err(LedgerError::not_found(NOT_FAVORITED));
        }
        self.article_view(article).await
    }

    /// Articles the actor has favorited, most recent first.
    pub async fn list_favorites(&self, actor: &Actor) -> Result<Vec<ArticleView>, LedgerError> {
        let articles = self.repository.list_favorite_articles(actor.id).await?;
        let mut views = Vec::with_capacity(articles.len());
        for article in articles {
            views.push(self.article_view(article).await?);
        }
        Ok(views)
    }
}
