use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActorId;

/// An article saved to an actor's profile. Unique per (profile, article).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    pub id: Uuid,
    pub actor_id: ActorId,
    pub article_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Summary of the bookmarked article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkedArticle {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookmarkView {
    pub id: Uuid,
    pub article: BookmarkedArticle,
    pub created_at: DateTime<Utc>,
}
