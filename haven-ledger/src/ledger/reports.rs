//! Abuse reports on articles.
use chrono::Utc;
use haven_shared::types::{Actor, ArticleReport, ArticleReportView};
use uuid::Uuid;

use super::{ARTICLE_NOT_FOUND, InteractionLedger};
use crate::access::{ensure_owner, ensure_verified};
use crate::errors::{ForbiddenReason, LedgerError};

const OWN_ARTICLE: &str = "You cannot report your own article.";
const REPORT_MISSING: &str = "Report not found";
const REASON_REQUIRED: &str = "Please provide a reason for the report.";

fn require_reason(reason: &str) -> Result<(), LedgerError> {
    if reason.trim().is_empty() {
        Err(LedgerError::validation(REASON_REQUIRED))
    } else {
        Ok(())
    }
}

impl InteractionLedger {
    async fn report_view(&self, report: ArticleReport) -> Result<ArticleReportView, LedgerError> {
        let article = self
            .repository
            .get_article(report.article_id)
            .await?
            .ok_or_else(|| LedgerError::not_found(ARTICLE_NOT_FOUND))?;
        Ok(ArticleReportView {
            id: report.id,
            author: self.username_of(report.reporter_id).await?,
            article: article.title,
            slug: article.slug,
            reason: report.reason,
            created_at: report.created_at,
        })
    }

    async fn report_views(&self, reports: Vec<ArticleReport>) -> Result<Vec<ArticleReportView>, LedgerError> {
        let mut views = Vec::with_capacity(reports.len());
        for report in reports {
            views.push(self.report_view(report).await?);
        }
        Ok(views)
    }

    async fn owned_report(&self, actor: &Actor, id: Uuid) -> Result<ArticleReport, LedgerError> {
        let report = self
            .repository
            .get_report(id)
            .await?
            .ok_or_else(|| LedgerError::not_found(REPORT_MISSING))?;
        ensure_owner(actor, report.reporter_id)?;
        Ok(report)
    }

    /// Reports an article written by someone else.
    pub async fn report_article(&self, actor: &Actor, slug: &str, reason: String) -> Result<ArticleReportView, LedgerError> {
        ensure_verified(actor)?;
        require_reason(&reason)?;
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        if article.author_id == actor.id {
            return Err(LedgerError::Forbidden(ForbiddenReason::OwnArticle(OWN_ARTICLE)));
        }

        let now = Utc::now();
        let report = ArticleReport {
            id: Uuid::new_v4(),
            reporter_id: actor.id,
            article_id: article.id,
            reason,
            created_at: now,
            updated_at: now,
        };
        self.repository.insert_report(&report).await?;
        tracing::warn!(actor = %actor.id, article = %article.id, report = %report.id, "article reported");
        self.report_view(report).await
    }

    pub async fn list_my_reports(&self, actor: &Actor) -> Result<Vec<ArticleReportView>, LedgerError> {
        let reports = self.repository.list_reports_by_reporter(actor.id).await?;
        self.report_views(reports).await
    }

    pub async fn list_article_reports(&self, slug: &str) -> Result<Vec<ArticleReportView>, LedgerError> {
        let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
        let reports = self.repository.list_reports_for_article(article.id).await?;
        self.report_views(reports).await
    }

    /// One of the actor's own reports.
    pub async fn get_report(&self, actor: &Actor, id: Uuid) -> Result<ArticleReportView, LedgerError> {
        let report = self.owned_report(actor, id).await?;
        self.report_view(report).await
    }

    pub async fn update_report(&self, actor: &Actor, id: Uuid, reason: String) -> Result<ArticleReportView, LedgerError> {
        ensure_verified(actor)?;
        require_reason(&reason)?;
        let mut report = self.owned_report(actor, id).await?;
        report.reason = reason;
        report.updated_at = Utc::now();
        self.repository.update_report(&report).await?;
        self.report_view(report).await
    }

    pub async fn delete_report(&self, actor: &Actor, id: Uuid) -> Result<(), LedgerError> {
        ensure_verified(actor)?;
        let report = self.owned_report(actor, id).await?;
        self.repository.delete_report(report.id).await?;
        Ok(())
    }
}
