use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::ActorId;

/// Lowest accepted rating value.
pub const RATING_MIN: i16 = 1;
/// Highest accepted rating value.
pub const RATING_MAX: i16 = 5;

/// An actor's rating of an article. At most one exists per (actor, article).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rating {
    pub id: Uuid,
    pub author_id: ActorId,
    pub article_id: Uuid,
    pub value: i16,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rating as rendered to clients: rater username, article title and slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RatingView {
    pub id: Uuid,
    pub author: String,
    pub article: String,
    pub slug: String,
    pub value: i16,
    pub review: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rounds a mean rating to one decimal place.
pub fn round_average(mean: f64) -> f64 {
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_average() {
        assert_eq!(round_average(3.0), 3.0);
        assert_eq!(round_average(10.0 / 3.0), 3.3);
        assert_eq!(round_average(11.0 / 3.0), 3.7);
    }
}
