use serde::{Deserialize, Serialize};

/// Aggregated vote counts for a single target.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VotesCount {
    pub like_count: i64,
    pub dislike_count: i64,
}
