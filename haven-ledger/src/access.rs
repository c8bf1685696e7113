//! Access checks shared by every ledger write.
use haven_shared::types::{Actor, ActorId};

use crate::errors::{ForbiddenReason, LedgerError};

/// Rejects actors whose email is not verified.
pub fn ensure_verified(actor: &Actor) -> Result<(), LedgerError> {
    if actor.is_verified {
        Ok(())
    } else {
        Err(LedgerError::Forbidden(ForbiddenReason::Unverified))
    }
}

/// Rejects `actor` unless it owns the record owned by `owner_id`.
pub fn ensure_owner(actor: &Actor, owner_id: ActorId) -> Result<(), LedgerError> {
    if actor.id == owner_id {
        Ok(())
    } else {
        Err(LedgerError::Forbidden(ForbiddenReason::NotOwner))
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn actor(is_verified: bool) -> Actor {
        Actor {
            id: Uuid::new_v4(),
            username: "reader".to_string(),
            email: "reader@haven.test".to_string(),
            bio: String::new(),
            image: None,
            is_verified,
        }
    }

    #[test]
    fn test_unverified_actor_is_forbidden() {
        let err = ensure_verified(&actor(false)).unwrap_err();
        assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::Unverified)));
        assert!(ensure_verified(&actor(true)).is_ok());
    }

    #[test]
    fn test_only_owner_passes() {
        let owner = actor(true);
        assert!(ensure_owner(&owner, owner.id).is_ok());
        let err = ensure_owner(&owner, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, LedgerError::Forbidden(ForbiddenReason::NotOwner)));
    }
}
