use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a registered user.
pub type ActorId = Uuid;

/// A registered user identity.
///
/// Actors are provisioned by the authentication service; the ledger only reads
/// them. `is_verified` mirrors the verified-email flag that gates every write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Actor {
    pub id: ActorId,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub image: Option<String>,
    pub is_verified: bool,
}

/// Public projection of an actor, rendered wherever an author is shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub username: String,
    pub bio: String,
    pub image: Option<String>,
}

impl Actor {
    pub fn profile(&self) -> Profile {
        Profile {
            username: self.username.clone(),
            bio: self.bio.clone(),
            image: self.image.clone(),
        }
    }
}
