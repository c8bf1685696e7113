//! Like/dislike toggle on articles and comments.
use haven_repository::RepositoryError;
use haven_shared::types::{
    Actor, ActorId, NotificationKind, Target, TargetKind, VoteTransition, VoteValue, VotesCount,
};
use uuid::Uuid;

use super::{ARTICLE_NOT_FOUND, COMMENT_NOT_FOUND, InteractionLedger};
use crate::access::ensure_verified;
use crate::errors::LedgerError;

/// How a client addresses a vote target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    Article { slug: String },
    Comment { slug: String, comment_id: Uuid },
}

fn target_missing(kind: TargetKind) -> LedgerError {
    match kind {
        TargetKind::Article => LedgerError::not_found(ARTICLE_NOT_FOUND),
        TargetKind::Comment => LedgerError::not_found(COMMENT_NOT_FOUND),
    }
}

impl InteractionLedger {
    /// Resolves a client reference to the target and the actor who owns it.
    async fn resolve_target(&self, target: &TargetRef) -> Result<(Target, ActorId), LedgerError> {
        match target {
            TargetRef::Article { slug } => {
                let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
                Ok((Target::Article(article.id), article.author_id))
            }
            TargetRef::Comment { slug, comment_id } => {
                let article = self.article_by_slug(slug, ARTICLE_NOT_FOUND).await?;
                let comment = self.comment_of(&article, *comment_id).await?;
                Ok((Target::Comment(comment.id), comment.author_id))
            }
        }
    }

    /// Submits a like or dislike.
    ///
    /// No vote yet creates one, the same value again removes it and the
    /// opposite value switches it in place. The owner of the target is
    /// notified only when a vote is created.
    ///
    /// # Arguments
    ///
    /// * `actor` - The verified actor voting
    /// * `target` - The article or comment voted on
    /// * `value` - Like or dislike
    ///
    /// # Returns
    ///
    /// The like and dislike counts of the target after the vote.
    pub async fn submit_vote(
        &self,
        actor: &Actor,
        target: &TargetRef,
        value: VoteValue,
    ) -> Result<VotesCount, LedgerError> {
        ensure_verified(actor)?;
        let (target, owner_id) = self.resolve_target(target).await?;

        // The target may be deleted between resolving and voting.
        let transition = match self.repository.apply_vote(actor.id, target, value).await {
            Ok(transition) => transition,
            Err(RepositoryError::TargetNotFound(kind)) => return Err(target_missing(kind)),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            actor = %actor.id,
            kind = target.kind().as_str(),
            target = %target.id(),
            ?value,
            ?transition,
            "vote applied"
        );

        if transition == VoteTransition::Created {
            self.emit(NotificationKind::ResourceLiked, owner_id, actor.id, target.id()).await;
        }

        Ok(self.repository.count_votes(target).await?)
    }

    /// Current like and dislike counts of a target.
    pub async fn votes_count(&self, target: &TargetRef) -> Result<VotesCount, LedgerError> {
        let (target, _) = self.resolve_target(target).await?;
        Ok(self.repository.count_votes(target).await?)
    }
}
