//! Bookmarks: one per actor and article.
use chrono::Utc;
use haven_repository::RepositoryError;
use haven_shared::types::{Actor, Bookmark, BookmarkView, BookmarkedArticle};
use uuid::Uuid;

use super::InteractionLedger;
use crate::access::ensure_verified;
use crate::errors::LedgerError;

const ARTICLE_MISSING: &str = "We couldn't add the bookmark because the article could not be found.";
const ALREADY_BOOKMARKED: &str = "The article has already been bookmarked.";
const BOOKMARK_MISSING: &str = "The bookmark does not exist.";

impl InteractionLedger {
    async fn bookmark_view(&self, bookmark: Bookmark) -> Result<BookmarkView, LedgerError> {
        let article = self
            .repository
            .get_article(bookmark.article_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(ARTICLE_MISSING))?;
        Ok(BookmarkView {
            id: bookmark.id,
            article: BookmarkedArticle {
                title: article.title,
                description: article.description,
                slug: article.slug,
                author: self.username_of(article.author_id).await?,
                created_at: article.created_at,
            },
            created_at: bookmark.created_at,
        })
    }

    /// Bookmarks an article for later reading.
    pub async fn add_bookmark(&self, actor: &Actor, slug: &str) -> Result<BookmarkView, LedgerError> {
        ensure_verified(actor)?;
        let article = self.article_by_slug(slug, ARTICLE_MISSING).await?;

        let bookmark = Bookmark {
            id: Uuid::new_v4(),
            actor_id: actor.id,
            article_id: article.id,
            created_at: Utc::now(),
        };
        match self.repository.insert_bookmark(&bookmark).await {
            Ok(()) => {}
            Err(RepositoryError::Conflict(_)) => return Err(LedgerError::conflict(ALREADY_BOOKMARKED)),
            Err(e) => return Err(e.into()),
        }
        tracing::info!(actor = %actor.id, article = %article.id, "article bookmarked");
        self.bookmark_view(bookmark).await
    }

    /// Deletes one of the actor's bookmarks.
    ///
    /// Bookmarks of other actors are reported as missing.
    pub async fn remove_bookmark(&self, actor: &Actor, id: Uuid) -> Result<(), LedgerError> {
        ensure_verified(actor)?;
        match self.repository.get_bookmark(id).await? {
            Some(bookmark) if bookmark.actor_id == actor.id => {
                self.repository.delete_bookmark(id).await?;
                tracing::info!(actor = %actor.id, bookmark = %id, "bookmark removed");
                Ok(())
            }
            _ => Err(LedgerError::not_found(BOOKMARK_MISSING)),
        }
    }

    pub async fn list_bookmarks(&self, actor: &Actor) -> Result<Vec<BookmarkView>, LedgerError> {
        let bookmarks = self.repository.list_bookmarks(actor.id).await?;
        let mut views = Vec::with_capacity(bookmarks.len());
        for bookmark in bookmarks {
            views.push(self.bookmark_view(bookmark).await?);
        }
        Ok(views)
    }
}
