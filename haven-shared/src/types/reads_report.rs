use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActorId;

/// A recorded view of an article.
///
/// Authenticated readers get one record per article; anonymous views are
/// recorded each time with no actor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadsReport {
    pub id: Uuid,
    pub article_id: Uuid,
    pub actor_id: Option<ActorId>,
    pub full_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadArticle {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "totalViews")]
    pub total_views: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReadsReportView {
    pub id: Uuid,
    pub user: Option<String>,
    pub article: ReadArticle,
    pub full_read: bool,
}
