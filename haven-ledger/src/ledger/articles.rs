//! Articles and their comment threads, the targets every interaction points at.
use chrono::Utc;
use haven_repository::RepositoryError;
use haven_shared::types::{
    Actor, Article, ArticleChanges, ArticleView, Comment, CommentView, NewArticle, NewComment,
    NotificationKind, slugify,
};
use uuid::Uuid;

use super::{ARTICLE_NOT_FOUND, InteractionLedger};
use crate::access::{ensure_owner, ensure_verified};
use crate::errors::LedgerError;

const SLUG_TAKEN: &str = "An article with a similar title was just published, please retry.";
const FALLBACK_SLUG: &str = "article";
/// Path segments that sit next to `:slug` in the API routes.
const RESERVED_SLUGS: [&str; 2] = ["me", "id"];

fn require(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        Err(LedgerError::Validation(format!("{field} may not be blank.")))
    } else {
        Ok(())
    }
}

fn base_slug(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() { FALLBACK_SLUG.to_string() } else { slug }
}

impl InteractionLedger {
    /// First free slug among `base`, `base-1`, `base-2`, ...
    ///
    /// `current` is the slug the article already owns, which counts as free.
    /// Reserved slugs are never free.
    async fn unique_slug(&self, base: &str, current: Option<&str>) -> Result<String, LedgerError> {
        let mut suffix = 0u32;
        loop {
            let candidate = if suffix == 0 { base.to_string() } else { format!("{base}-{suffix}") };
            if RESERVED_SLUGS.contains(&candidate.as_str()) {
                suffix += 1;
                continue;
            }
            if current == Some(candidate.as_str()) || !self.repository.slug_exists(&candidate).await? {
                return Ok(candidate);
            }
            suffix += 1;
        }
    }

    /// Publishes an article under a slug derived from its title.
    pub async fn publish_article(&self, actor: &Actor, new: NewArticle) -> Result<ArticleView, LedgerError> {
        ensure_verified(actor)?;
        require("title", &new.title)?;
        require("description", &new.description)?;
        require("body", &new.body)?;

        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            slug: self.unique_slug(&base_slug(&new.title), None).await?,
            title: new.title,
            description: new.description,
            body: new.body,
            author_id: actor.id,
            created_at: now,
            updated_at: now,
        };
        match self.repository.insert_article(&article).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => return Err(LedgerError::conflict(SLUG_TAKEN)),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(actor = %actor.id, article = %article.id, slug = %article.slug, "article published");
        self.article_view(article).await
    }

    /// Reads an article and records the read for analytics.
    ///
    /// # Arguments
    ///
    /// * `slug` - The article read
    /// * `reader` - The authenticated reader, `None` for anonymous reads
    pub async fn get_article(&self, slug: &str, reader: Option<&Actor>) -> Result<ArticleView, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        let read = self.repository.record_read(article.id, reader.map(|actor| actor.id)).await?;
        tracing::debug!(article = %article.id, read = %read.id, "read recorded");
        self.article_view(article).await
    }

    pub async fn list_articles(&self) -> Result<Vec<ArticleView>, LedgerError> {
        let articles = self.repository.list_articles().await?;
        let mut views = Vec::with_capacity(articles.len());
        for article in articles {
            views.push(self.article_view(article).await?);
        }
        Ok(views)
    }

    /// Edits the actor's own article.
    ///
    /// A new title moves the article to a new slug. A new body invalidates
    /// every highlight, so they are purged.
    pub async fn update_article(
        &self,
        actor: &Actor,
        slug: &str,
        changes: ArticleChanges,
    ) -> Result<ArticleView, LedgerError> {
        ensure_verified(actor)?;
        let mut article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        ensure_owner(actor, article.author_id)?;

        let mut body_changed = false;
        if let Some(title) = changes.title.filter(|title| *title != article.title) {
            require("title", &title)?;
            let slug = self.unique_slug(&base_slug(&title), Some(&article.slug)).await?;
            article.title = title;
            article.slug = slug;
        }
        if let Some(description) = changes.description {
            require("description", &description)?;
            article.description = description;
        }
        if let Some(body) = changes.body.filter(|body| *body != article.body) {
            require("body", &body)?;
            article.body = body;
            body_changed = true;
        }
        article.updated_at = Utc::now();

        let purged = match self.repository.update_article(&article, body_changed).await {
            Ok(purged) => purged,
            Err(RepositoryError::Conflict(_)) => return Err(LedgerError::conflict(SLUG_TAKEN)),
            Err(e) => return Err(e.into()),
        };
        if body_changed {
            tracing::info!(article = %article.id, purged, "body changed, highlights purged");
        }
        self.article_view(article).await
    }

    /// Deletes the actor's own article with everything attached to it.
    pub async fn delete_article(&self, actor: &Actor, slug: &str) -> Result<(), LedgerError> {
        ensure_verified(actor)?;
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        ensure_owner(actor, article.author_id)?;
        self.repository.delete_article(article.id).await?;
        tracing::info!(actor = %actor.id, article = %article.id, "article deleted");
        Ok(())
    }

    /// Comments on an article, or replies to one of its comments.
    ///
    /// The article's author and everyone who favorited the article are notified.
    pub async fn add_comment(&self, actor: &Actor, slug: &str, new: NewComment) -> Result<CommentView, LedgerError> {
        ensure_verified(actor)?;
        require("body", &new.body)?;
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        if let Some(parent_id) = new.parent_id {
            self.comment_of(&article, parent_id).await?;
        }

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            article_id: article.id,
            author_id: actor.id,
            body: new.body,
            parent_id: new.parent_id,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_comment(&comment).await?;
        tracing::info!(actor = %actor.id, article = %article.id, comment = %comment.id, "comment added");

        self.emit(NotificationKind::ArticleComment, article.author_id, actor.id, comment.id).await;
        for favoriter in self.repository.list_favoriters(article.id).await? {
            if favoriter != article.author_id {
                self.emit(NotificationKind::ArticleComment, favoriter, actor.id, comment.id).await;
            }
        }
        self.comment_view(comment).await
    }

    pub async fn get_comment(&self, slug: &str, id: Uuid) -> Result<CommentView, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        let comment = self.comment_of(&article, id).await?;
        self.comment_view(comment).await
    }

    pub async fn edit_comment(
        &self,
        actor: &Actor,
        slug: &str,
        id: Uuid,
        body: String,
    ) -> Result<CommentView, LedgerError> {
        ensure_verified(actor)?;
        require("body", &body)?;
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        let mut comment = self.comment_of(&article, id).await?;
        ensure_owner(actor, comment.author_id)?;

        comment.body = body;
        comment.updated_at = Utc::now();
        self.repository.update_comment(&comment).await?;
        self.comment_view(comment).await
    }

    /// Deletes the actor's own comment, its replies and the votes on them.
    pub async fn delete_comment(&self, actor: &Actor, slug: &str, id: Uuid) -> Result<(), LedgerError> {
        ensure_verified(actor)?;
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        let comment = self.comment_of(&article, id).await?;
        ensure_owner(actor, comment.author_id)?;
        self.repository.delete_comment(comment.id).await?;
        tracing::info!(actor = %actor.id, comment = %comment.id, "comment deleted");
        Ok(())
    }

    /// Top-level comments of an article, or the direct replies to `parent_id`.
    pub async fn list_comments(&self, slug: &str, parent_id: Option<Uuid>) -> Result<Vec<CommentView>, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        let comments = self.repository.list_comments(article.id, parent_id).await?;
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            views.push(self.comment_view(comment).await?);
        }
        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_slug_falls_back_for_symbol_titles() {
        assert_eq!(base_slug("Hello World"), "hello-world");
        assert_eq!(base_slug("!!!"), FALLBACK_SLUG);
    }

    #[test]
    fn test_require_rejects_blank() {
        assert!(require("title", "x").is_ok());
        assert_eq!(require("title", "  ").unwrap_err().to_string(), "title may not be blank.");
    }
}
