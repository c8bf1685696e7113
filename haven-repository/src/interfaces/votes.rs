//! This module defines the `VotesRepository` trait, the storage side of the
//! like/dislike toggle.
use haven_shared::types::{ActorId, Target, Vote, VoteTransition, VoteValue, VotesCount};

use crate::errors::RepositoryError;

/// A trait that defines the interface for reaction persistence.
///
/// At most one vote exists per `(actor, target)` pair.
#[async_trait::async_trait]
pub trait VotesRepository: Send + Sync {
    /// Applies a submitted reaction as one atomic step.
    ///
    /// The transition is decided against the vote stored at the moment of the
    /// write, never against a value read earlier:
    ///
    /// * no vote stored: the vote is created
    /// * same value stored: the vote is removed
    /// * opposite value stored: the value is switched
    ///
    /// # Arguments
    ///
    /// * `actor_id` - The reacting actor.
    /// * `target` - The article or comment reacted to.
    /// * `value` - The submitted reaction.
    ///
    /// # Returns
    ///
    /// The [`VoteTransition`] that was applied, or
    /// `RepositoryError::TargetNotFound` when the target has been deleted.
    /// A vote is never stored for a missing target.
    async fn apply_vote(
        &self,
        actor_id: ActorId,
        target: Target,
        value: VoteValue,
    ) -> Result<VoteTransition, RepositoryError>;

    async fn get_vote(
        &self,
        actor_id: ActorId,
        target: Target,
    ) -> Result<Option<Vote>, RepositoryError>;

    /// Counts likes and dislikes currently stored for `target`.
    async fn count_votes(&self, target: Target) -> Result<VotesCount, RepositoryError>;
}
