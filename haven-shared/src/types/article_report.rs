use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActorId;

/// An abuse report filed against an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleReport {
    pub id: Uuid,
    pub reporter_id: ActorId,
    pub article_id: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleReportView {
    pub id: Uuid,
    pub author: String,
    pub article: String,
    pub slug: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}
