//! Read statistics.
use haven_shared::types::{Actor, ReadArticle, ReadsReport, ReadsReportView};

use super::InteractionLedger;
use crate::errors::LedgerError;

const ARTICLE_MISSING: &str = "This article does not exist.";
const NOT_READ: &str = "You have not read this article yet.";
const UP_TO_DATE: &str = "The reading report is already up to date.";
const CANNOT_UNREAD: &str = "You cannot unread an article.";

impl InteractionLedger {
    async fn read_view(&self, read: ReadsReport) -> Result<ReadsReportView, LedgerError> {
        let article = self
            .repository
            .get_article(read.article_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(ARTICLE_MISSING))?;
        let user = match read.actor_id {
            Some(actor_id) => Some(self.username_of(actor_id).await?),
            None => None,
        };
        Ok(ReadsReportView {
            id: read.id,
            user,
            article: ReadArticle {
                total_views: self.repository.count_reads(article.id).await?,
                author: self.username_of(article.author_id).await?,
                title: article.title,
                description: article.description,
                slug: article.slug,
                created_at: article.created_at,
            },
            full_read: read.full_read,
        })
    }

    async fn read_views(&self, reads: Vec<ReadsReport>) -> Result<Vec<ReadsReportView>, LedgerError> {
        let mut views = Vec::with_capacity(reads.len());
        for read in reads {
            views.push(self.read_view(read).await?);
        }
        Ok(views)
    }

    /// Articles the actor has opened.
    pub async fn my_reads(&self, actor: &Actor) -> Result<Vec<ReadsReportView>, LedgerError> {
        let reads = self.repository.list_reads_by_reader(actor.id).await?;
        self.read_views(reads).await
    }

    /// Reads of articles the actor wrote, anonymous ones included.
    pub async fn reads_of_my_articles(&self, actor: &Actor) -> Result<Vec<ReadsReportView>, LedgerError> {
        let reads = self.repository.list_reads_for_author(actor.id).await?;
        self.read_views(reads).await
    }

    /// Marks the actor's read of an article as a full read.
    ///
    /// A read only moves forward. A record that is already full is reported
    /// as up to date, and `full_read == false` is rejected.
    pub async fn mark_read(&self, actor: &Actor, slug: &str, full_read: bool) -> Result<ReadsReportView, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_MISSING).await?;
        let mut read = self
            .repository
            .get_read(actor.id, article.id)
            .await?
            .ok_or_else(|| LedgerError::not_found(NOT_READ))?;

        if read.full_read {
            return Err(LedgerError::validation(UP_TO_DATE));
        }
        if !full_read {
            return Err(LedgerError::validation(CANNOT_UNREAD));
        }

        self.repository.mark_full_read(read.id).await?;
        read.full_read = true;
        tracing::info!(actor = %actor.id, article = %article.id, "article fully read");
        self.read_view(read).await
    }
}
