use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActorId;

/// Events the ledger hands to the external notification dispatcher.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ResourceLiked,
    ArticleRated,
    ArticleComment,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::ResourceLiked => "resource_liked",
            NotificationKind::ArticleRated => "article_rated",
            NotificationKind::ArticleComment => "article_comment",
        }
    }
}

/// A single notification addressed to one recipient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub recipient_id: ActorId,
    pub source_id: ActorId,
    /// Id of the record that triggered the event (vote target, rating, comment).
    pub object_id: Uuid,
}
