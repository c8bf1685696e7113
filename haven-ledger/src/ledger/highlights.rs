//! Highlights: character ranges of an article body, toggled per actor.
use chrono::Utc;
use haven_repository::RepositoryError;
use haven_shared::types::{
    Actor, Article, Highlight, HighlightChanges, HighlightToggle, HighlightView, HighlightedArticle,
    NewHighlight,
};
use serde::Deserialize;
use uuid::Uuid;

use super::InteractionLedger;
use crate::access::{ensure_owner, ensure_verified};
use crate::errors::LedgerError;

const END_BEFORE_START: &str =
    "The start index is greater than the end index. Cannot highlight with invalid indexes.";
const OUT_OF_RANGE: &str = "Highlight is out of the article body length";
const ARTICLE_MISSING: &str = "Could not highlight because the article could not be found.";
const HIGHLIGHT_MISSING: &str = "Highlight not found.";
const ARTICLE_CHANGED: &str = "The article was edited while highlighting, please retry.";
const NOTHING_TO_UPDATE: &str = "Provide a comment or private field to update the highlight.";

/// A submitted highlight range.
#[derive(Debug, Clone, Deserialize)]
pub struct HighlightRequest {
    pub start_index: i32,
    pub end_index: i32,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub private: bool,
}

/// What a highlight submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightOutcome {
    Added(HighlightView),
    Removed,
}

impl HighlightOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            HighlightOutcome::Added(_) => "Highlight has been added.",
            HighlightOutcome::Removed => "Highlight removed.",
        }
    }
}

/// Checks `0 <= start <= end <= len(body) - 1`, in characters.
fn validate_range(article: &Article, start: i32, end: i32) -> Result<(), LedgerError> {
    if start > end {
        return Err(LedgerError::validation(END_BEFORE_START));
    }
    let last = article.body_len() as i64 - 1;
    if start < 0 || i64::from(end) > last {
        return Err(LedgerError::validation(OUT_OF_RANGE));
    }
    Ok(())
}

impl InteractionLedger {
    async fn highlight_view(&self, highlight: Highlight, article: &Article) -> Result<HighlightView, LedgerError> {
        Ok(HighlightView {
            id: highlight.id,
            start_index: highlight.start_index,
            end_index: highlight.end_index,
            text: article.excerpt(highlight.start_index as usize, highlight.end_index as usize),
            comment: highlight.comment,
            private: highlight.private,
            article: HighlightedArticle {
                title: article.title.clone(),
                slug: article.slug.clone(),
                author: self.username_of(article.author_id).await?,
            },
            highlighted_by: self.username_of(highlight.actor_id).await?,
        })
    }

    async fn highlight_views(&self, highlights: Vec<Highlight>) -> Result<Vec<HighlightView>, LedgerError> {
        let mut views = Vec::with_capacity(highlights.len());
        for highlight in highlights {
            let Some(article) = self.repository.get_article(highlight.article_id).await? else {
                continue;
            };
            views.push(self.highlight_view(highlight, &article).await?);
        }
        Ok(views)
    }

    /// Highlights a range of an article, or removes the actor's highlight of
    /// exactly that range.
    ///
    /// # Arguments
    ///
    /// * `actor` - The verified actor highlighting
    /// * `slug` - The highlighted article
    /// * `request` - Range, comment and privacy flag
    ///
    /// # Returns
    ///
    /// `HighlightOutcome::Added` with the stored highlight, or `HighlightOutcome::Removed`.
    pub async fn toggle_highlight(
        &self,
        actor: &Actor,
        slug: &str,
        request: HighlightRequest,
    ) -> Result<HighlightOutcome, LedgerError> {
        ensure_verified(actor)?;
        let article = self.article_by_slug(slug, ARTICLE_MISSING).await?;
        validate_range(&article, request.start_index, request.end_index)?;

        let submitted = NewHighlight {
            actor_id: actor.id,
            article_id: article.id,
            start_index: request.start_index,
            end_index: request.end_index,
            comment: request.comment,
            private: request.private,
            article_version: article.updated_at,
        };
        let toggle = match self.repository.toggle_highlight(&submitted).await {
            Ok(toggle) => toggle,
            Err(RepositoryError::Stale(_)) => return Err(LedgerError::conflict(ARTICLE_CHANGED)),
            Err(RepositoryError::TargetNotFound(_)) => return Err(LedgerError::not_found(ARTICLE_MISSING)),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            actor = %actor.id,
            article = %article.id,
            start = submitted.start_index,
            end = submitted.end_index,
            added = matches!(toggle, HighlightToggle::Added(_)),
            "highlight toggled"
        );

        match toggle {
            HighlightToggle::Added(highlight) => {
                Ok(HighlightOutcome::Added(self.highlight_view(highlight, &article).await?))
            }
            HighlightToggle::Removed => Ok(HighlightOutcome::Removed),
        }
    }

    /// Changes the comment and/or privacy of the actor's own highlight.
    pub async fn update_highlight(
        &self,
        actor: &Actor,
        id: Uuid,
        changes: HighlightChanges,
    ) -> Result<HighlightView, LedgerError> {
        ensure_verified(actor)?;
        if changes.is_empty() {
            return Err(LedgerError::validation(NOTHING_TO_UPDATE));
        }
        let mut highlight = self
            .repository
            .get_highlight(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(HIGHLIGHT_MISSING))?;
        ensure_owner(actor, highlight.actor_id)?;

        if let Some(comment) = changes.comment {
            highlight.comment = comment;
        }
        if let Some(private) = changes.private {
            highlight.private = private;
        }
        highlight.updated_at = Utc::now();
        self.repository.update_highlight(&highlight).await?;

        let article = self
            .repository
            .get_article(highlight.article_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(ARTICLE_MISSING))?;
        self.highlight_view(highlight, &article).await
    }

    /// The actor's highlights, on one article or on all of them.
    pub async fn list_my_highlights(
        &self,
        actor: &Actor,
        slug: Option<&str>,
    ) -> Result<Vec<HighlightView>, LedgerError> {
        let article_id = match slug {
            Some(slug) => Some(self.article_by_slug(slug, ARTICLE_MISSING).await?.id),
            None => None,
        };
        let highlights = self.repository.list_highlights(actor.id, article_id).await?;
        self.highlight_views(highlights).await
    }

    /// Every non-private highlight of an article.
    pub async fn list_public_highlights(&self, slug: &str) -> Result<Vec<HighlightView>, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_MISSING).await?;
        let highlights = self.repository.list_public_highlights(article.id).await?;
        let mut views = Vec::with_capacity(highlights.len());
        for highlight in highlights {
            views.push(self.highlight_view(highlight, &article).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn article(body: &str) -> Article {
        let now = Utc::now();
        Article {
            id: Uuid::new_v4(),
            slug: "a".to_string(),
            title: "A".to_string(),
            description: String::new(),
            body: body.to_string(),
            author_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_validate_range() {
        let article = article("hello");
        assert!(validate_range(&article, 0, 4).is_ok());
        assert!(validate_range(&article, 2, 2).is_ok());
        assert_eq!(validate_range(&article, 3, 1).unwrap_err().to_string(), END_BEFORE_START);
        assert_eq!(validate_range(&article, 0, 5).unwrap_err().to_string(), OUT_OF_RANGE);
        assert_eq!(validate_range(&article, -1, 2).unwrap_err().to_string(), OUT_OF_RANGE);
    }

    #[test]
    fn test_validate_range_counts_characters() {
        // 5 characters, 7 bytes.
        let article = article("héllö");
        assert!(validate_range(&article, 0, 4).is_ok());
        assert!(validate_range(&article, 0, 5).is_err());
    }

    #[test]
    fn test_empty_body_cannot_be_highlighted() {
        let article = article("");
        assert_eq!(validate_range(&article, 0, 0).unwrap_err().to_string(), OUT_OF_RANGE);
    }
}
