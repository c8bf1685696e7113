//! Ratings: one per actor and article, never on one's own article.
use chrono::Utc;
use haven_repository::RepositoryError;
use haven_shared::types::{Actor, Article, NotificationKind, RATING_MAX, RATING_MIN, Rating, RatingView};
use serde::Deserialize;
use uuid::Uuid;

use super::{ARTICLE_NOT_FOUND, InteractionLedger};
use crate::access::{ensure_owner, ensure_verified};
use crate::errors::{ForbiddenReason, LedgerError};

const OUT_OF_RANGE: &str = "please keep range of rating from 1-5";
const OWN_ARTICLE: &str = "cannot rate own article";
const RATED_TWICE: &str = "cannot rate an article twice";
const NO_RATINGS: &str = "no ratings for this article present";
const RATING_NOT_FOUND: &str = "Rating not found";

/// Partial update of a rating.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatingChanges {
    pub value: Option<i64>,
    pub review: Option<String>,
}

/// Accepts any integer a client may send and narrows it once it is in range.
fn validate_value(value: i64) -> Result<i16, LedgerError> {
    i16::try_from(value)
        .ok()
        .filter(|value| (RATING_MIN..=RATING_MAX).contains(value))
        .ok_or_else(|| LedgerError::validation(OUT_OF_RANGE))
}

impl InteractionLedger {
    async fn rating_view(&self, rating: Rating, article: &Article) -> Result<RatingView, LedgerError> {
        Ok(RatingView {
            id: rating.id,
            author: self.username_of(rating.author_id).await?,
            article: article.title.clone(),
            slug: article.slug.clone(),
            value: rating.value,
            review: rating.review,
            created_at: rating.created_at,
            updated_at: rating.updated_at,
        })
    }

    async fn owned_rating(&self, actor: &Actor, id: Uuid) -> Result<(Rating, Article), LedgerError> {
        let rating = self
            .repository
            .get_rating(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(RATING_NOT_FOUND))?;
        ensure_owner(actor, rating.author_id)?;
        let article = self
            .repository
            .get_article(rating.article_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(ARTICLE_NOT_FOUND))?;
        Ok((rating, article))
    }

    /// Rates an article.
    ///
    /// # Arguments
    ///
    /// * `actor` - The verified rater; must not be the article's author
    /// * `slug` - The rated article
    /// * `value` - Between 1 and 5 inclusive
    /// * `review` - Optional free text, may be empty
    ///
    /// # Returns
    ///
    /// The stored rating, or `Conflict` when the actor already rated the article.
    pub async fn submit_rating(
        &self,
        actor: &Actor,
        slug: &str,
        value: i64,
        review: String,
    ) -> Result<RatingView, LedgerError> {
        ensure_verified(actor)?;
        let value = validate_value(value)?;
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        if article.author_id == actor.id {
            return Err(LedgerError::Forbidden(ForbiddenReason::OwnArticle(OWN_ARTICLE)));
        }

        let now = Utc::now();
        let rating = Rating {
            id: Uuid::new_v4(),
            author_id: actor.id,
            article_id: article.id,
            value,
            review,
            created_at: now,
            updated_at: now,
        };
        match self.repository.insert_rating(&rating).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => return Err(LedgerError::conflict(RATED_TWICE)),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(actor = %actor.id, article = %article.id, value, "article rated");

        self.emit(NotificationKind::ArticleRated, article.author_id, actor.id, rating.id).await;
        self.rating_view(rating, &article).await
    }

    /// Lists the ratings of an article; an unrated article is `NotFound`.
    pub async fn list_ratings(&self, slug: &str) -> Result<Vec<RatingView>, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        let ratings = self.repository.list_ratings(article.id).await?;
        if ratings.is_empty() {
            return Err(LedgerError::not_found(NO_RATINGS));
        }
        let mut views = Vec::with_capacity(ratings.len());
        for rating in ratings {
            views.push(self.rating_view(rating, &article).await?);
        }
        Ok(views)
    }

    pub async fn get_rating(&self, id: Uuid) -> Result<RatingView, LedgerError> {
        let rating = self
            .repository
            .get_rating(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(RATING_NOT_FOUND))?;
        let article = self
            .repository
            .get_article(rating.article_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(ARTICLE_NOT_FOUND))?;
        self.rating_view(rating, &article).await
    }

    /// Changes value and/or review of the actor's own rating.
    pub async fn update_rating(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: RatingChanges,
    ) -> Result<RatingView, LedgerError> {
        ensure_verified(actor)?;
        let (mut rating, article) = self.owned_rating(actor, id).await?;
        if let Some(value) = changes.value {
            rating.value = validate_value(value)?;
        }
        if let Some(review) = changes.review {
            rating.review = review;
        }
        rating.updated_at = Utc::now();
        self.repository.update_rating(&rating).await?;
        self.rating_view(rating, &article).await
    }

    pub async fn delete_rating(&self, actor: &Actor, id: Uuid) -> Result<(), LedgerError> {
        ensure_verified(actor)?;
        let (rating, _) = self.owned_rating(actor, id).await?;
        self.repository.delete_rating(rating.id).await?;
        tracing::info!(actor = %actor.id, rating = %rating.id, "rating deleted");
        Ok(())
    }
}
