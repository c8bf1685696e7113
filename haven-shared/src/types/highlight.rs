use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActorId;

/// A highlighted passage of an article.
///
/// Unique per (profile, article, start_index, end_index). Indexes are
/// character offsets into the article body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Highlight {
    pub id: Uuid,
    pub actor_id: ActorId,
    pub article_id: Uuid,
    pub start_index: i32,
    pub end_index: i32,
    pub comment: String,
    pub private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A highlight about to be toggled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHighlight {
    pub actor_id: ActorId,
    pub article_id: Uuid,
    pub start_index: i32,
    pub end_index: i32,
    pub comment: String,
    pub private: bool,
    /// `updated_at` of the article the range was checked against.
    pub article_version: DateTime<Utc>,
}

/// Explicit edit of an existing highlight, keyed by id rather than range.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightChanges {
    pub comment: Option<String>,
    pub private: Option<bool>,
}

impl HighlightChanges {
    pub fn is_empty(&self) -> bool {
        self.comment.is_none() && self.private.is_none()
    }
}

/// Result of submitting a highlight range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightToggle {
    Added(Highlight),
    /// An identical range existed and was deleted.
    Removed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightedArticle {
    pub title: String,
    pub slug: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightView {
    pub id: Uuid,
    pub start_index: i32,
    pub end_index: i32,
    pub comment: String,
    pub private: bool,
    pub text: String,
    pub article: HighlightedArticle,
    pub highlighted_by: String,
}
