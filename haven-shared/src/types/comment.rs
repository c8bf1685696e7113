use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ActorId, Profile};

/// A comment on an article, optionally replying to another comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: ActorId,
    pub body: String,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for a new comment or reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub body: String,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Public representation of a comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CommentView {
    pub id: Uuid,
    pub body: String,
    pub author: Profile,
    pub parent_id: Option<Uuid>,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
