//! Read statistics and abuse reports on PostgreSQL.
use async_trait::async_trait;
use chrono::Utc;
use haven_shared::types::{ActorId, ArticleReport, ReadsReport};
use uuid::Uuid;

use super::PostgresRepository;
use super::rows::{READ_COLUMNS, REPORT_COLUMNS, ReadRow, ReportRow};
use crate::errors::RepositoryError;
use crate::interfaces::{AnalyticsRepository, ReportsRepository};

#[async_trait]
impl AnalyticsRepository for PostgresRepository {
    async fn record_read(
        &self,
        article_id: Uuid,
        actor_id: Option<ActorId>,
    ) -> Result<ReadsReport, RepositoryError> {
        let now = Utc::now();
        let insert_sql = format!(
            "INSERT INTO reads_reports (id, article_id, actor_id, full_read, created_at, updated_at)
             VALUES ($1, $2, $3, FALSE, $4, $4)
             ON CONFLICT (actor_id, article_id) DO NOTHING
             RETURNING {READ_COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, ReadRow>(&insert_sql)
            .bind(Uuid::new_v4())
            .bind(article_id)
            .bind(actor_id)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = inserted {
            return Ok(row.into());
        }

        // Only identified readers can collide; their first record is kept.
        let select_sql = format!("SELECT {READ_COLUMNS} FROM reads_reports WHERE actor_id = $1 AND article_id = $2");
        let existing = sqlx::query_as::<_, ReadRow>(&select_sql)
            .bind(actor_id)
            .bind(article_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(existing.into())
    }

    async fn get_read(&self, actor_id: ActorId, article_id: Uuid) -> Result<Option<ReadsReport>, RepositoryError> {
        let sql = format!("SELECT {READ_COLUMNS} FROM reads_reports WHERE actor_id = $1 AND article_id = $2");
        let row = sqlx::query_as::<_, ReadRow>(&sql)
            .bind(actor_id)
            .bind(article_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ReadsReport::from))
    }

    async fn mark_full_read(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE reads_reports SET full_read = TRUE, updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_reads(&self, article_id: Uuid) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reads_reports WHERE article_id = $1")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list_reads_by_reader(&self, actor_id: ActorId) -> Result<Vec<ReadsReport>, RepositoryError> {
        let sql = format!("SELECT {READ_COLUMNS} FROM reads_reports WHERE actor_id = $1 ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ReadRow>(&sql)
            .bind(actor_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ReadsReport::from).collect())
    }

    async fn list_reads_for_author(&self, author_id: ActorId) -> Result<Vec<ReadsReport>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReadRow>(
            "SELECT r.id, r.article_id, r.actor_id, r.full_read, r.created_at, r.updated_at
             FROM reads_reports r JOIN articles a ON a.id = r.article_id
             WHERE a.author_id = $1 ORDER BY r.created_at DESC",
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(ReadsReport::from).collect())
    }
}

#[async_trait]
impl ReportsRepository for PostgresRepository {
    async fn insert_report(&self, report: &ArticleReport) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO article_reports (id, reporter_id, article_id, reason, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(report.id)
        .bind(report.reporter_id)
        .bind(report.article_id)
        .bind(&report.reason)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_report(&self, id: Uuid) -> Result<Option<ArticleReport>, RepositoryError> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM article_reports WHERE id = $1");
        let row = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ArticleReport::from))
    }

    async fn update_report(&self, report: &ArticleReport) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE article_reports SET reason = $2, updated_at = $3 WHERE id = $1")
            .bind(report.id)
            .bind(&report.reason)
            .bind(report.updated_at)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_report(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let deleted = sqlx::query("DELETE FROM article_reports WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn list_reports_by_reporter(&self, reporter_id: ActorId) -> Result<Vec<ArticleReport>, RepositoryError> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM article_reports WHERE reporter_id = $1 ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(reporter_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ArticleReport::from).collect())
    }

    async fn list_reports_for_article(&self, article_id: Uuid) -> Result<Vec<ArticleReport>, RepositoryError> {
        let sql = format!("SELECT {REPORT_COLUMNS} FROM article_reports WHERE article_id = $1 ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ReportRow>(&sql)
            .bind(article_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(ArticleReport::from).collect())
    }
}
