use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ActorId, Target};

/// Polarity of a vote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VoteValue {
    /// Stored as `+1`.
    Like,
    /// Stored as `-1`.
    Dislike,
}

impl VoteValue {
    pub fn as_i16(self) -> i16 {
        match self {
            VoteValue::Like => 1,
            VoteValue::Dislike => -1,
        }
    }
}

impl TryFrom<i16> for VoteValue {
    type Error = i16;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VoteValue::Like),
            -1 => Ok(VoteValue::Dislike),
            other => Err(other),
        }
    }
}

/// A single actor's vote on a target. At most one exists per (actor, target).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vote {
    pub actor_id: ActorId,
    pub target: Target,
    pub value: VoteValue,
    pub voted_at: DateTime<Utc>,
}

/// What submitting a vote did to the stored (actor, target) row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// No vote existed; one was inserted.
    Created,
    /// A vote of the other polarity existed; it was flipped in place.
    Switched,
    /// A vote of the same polarity existed; it was deleted.
    Removed,
}

impl VoteTransition {
    /// Decides the transition for a submission given the currently stored polarity.
    pub fn resolve(existing: Option<VoteValue>, submitted: VoteValue) -> Self {
        match existing {
            None => VoteTransition::Created,
            Some(current) if current == submitted => VoteTransition::Removed,
            Some(_) => VoteTransition::Switched,
        }
    }
}
