//! This module defines the `ReportsRepository` trait for article abuse reports.
use haven_shared::types::{ActorId, ArticleReport};
use uuid::Uuid;

use crate::errors::RepositoryError;

#[async_trait::async_trait]
pub trait ReportsRepository: Send + Sync {
    async fn insert_report(&self, report: &ArticleReport) -> Result<(), RepositoryError>;

    async fn get_report(&self, id: Uuid) -> Result<Option<ArticleReport>, RepositoryError>;

    /// Overwrites reason and `updated_at`.
    async fn update_report(&self, report: &ArticleReport) -> Result<(), RepositoryError>;

    async fn delete_report(&self, id: Uuid) -> Result<bool, RepositoryError>;

    async fn list_reports_by_reporter(&self, reporter_id: ActorId) -> Result<Vec<ArticleReport>, RepositoryError>;

    async fn list_reports_for_article(&self, article_id: Uuid) -> Result<Vec<ArticleReport>, RepositoryError>;
}
