// App state for Axum server
use std::sync::Arc;

use haven_ledger::InteractionLedger;
use haven_repository::HavenRepository;

use crate::auth::JwtAuthenticator;
use crate::config::Dependencies;

#[derive(Clone)]
pub struct AppState {
    pub ledger: InteractionLedger,
    pub repository: Arc<dyn HavenRepository>,
    pub authenticator: Arc<JwtAuthenticator>,
}

impl From<Dependencies> for AppState {
    fn from(dependencies: Dependencies) -> Self {
        Self {
            ledger: dependencies.ledger,
            repository: dependencies.repository,
            authenticator: Arc::new(dependencies.authenticator),
        }
    }
}
