//! This module defines the `AnalyticsRepository` trait for read statistics.
use haven_shared::types::{ActorId, ReadsReport};
use uuid::Uuid;

use crate::errors::RepositoryError;

#[async_trait::async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Records that an article was opened.
    ///
    /// Anonymous reads always add a row. An identified reader gets one row per
    /// article; repeated reads return the existing row untouched.
    ///
    /// # Arguments
    ///
    /// * `article_id` - The article read.
    /// * `actor_id` - The reader, `None` when anonymous.
    ///
    /// # Returns
    ///
    /// The stored read record.
    async fn record_read(
        &self,
        article_id: Uuid,
        actor_id: Option<ActorId>,
    ) -> Result<ReadsReport, RepositoryError>;

    async fn get_read(
        &self,
        actor_id: ActorId,
        article_id: Uuid,
    ) -> Result<Option<ReadsReport>, RepositoryError>;

    /// Flags a read record as a full read.
    async fn mark_full_read(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// Number of read records of an article, anonymous ones included.
    async fn count_reads(&self, article_id: Uuid) -> Result<i64, RepositoryError>;

    /// Reads recorded for `actor_id` as the reader.
    async fn list_reads_by_reader(&self, actor_id: ActorId) -> Result<Vec<ReadsReport>, RepositoryError>;

    /// Reads recorded against articles written by `author_id`.
    async fn list_reads_for_author(&self, author_id: ActorId) -> Result<Vec<ReadsReport>, RepositoryError>;
}
