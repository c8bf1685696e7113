use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActorId;

/// An article an actor marked as favorite. Unique per (actor, article).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Favorite {
    pub id: Uuid,
    pub actor_id: ActorId,
    pub article_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Favorite as rendered to clients, carrying the outcome message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoriteView {
    pub message: String,
    pub id: Uuid,
    pub user_id: ActorId,
    pub article_id: Uuid,
}
