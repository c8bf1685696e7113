//! This module defines the `ActorsRepository` trait for registered accounts.
use haven_shared::types::{Actor, ActorId};

use crate::errors::RepositoryError;

/// Storage for actors. Account management lives elsewhere; the ledger only
/// reads actors, the insert exists for seeding and tests.
#[async_trait::async_trait]
pub trait ActorsRepository: Send + Sync {
    /// Inserts a new actor.
    ///
    /// # Returns
    ///
    /// `RepositoryError::Conflict` if the username or email is taken.
    async fn insert_actor(&self, actor: &Actor) -> Result<(), RepositoryError>;

    /// Fetches an actor by id.
    async fn get_actor(&self, id: ActorId) -> Result<Option<Actor>, RepositoryError>;
}
