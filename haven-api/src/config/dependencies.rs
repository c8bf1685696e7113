use std::sync::Arc;

use haven_ledger::{InteractionLedger, TracingNotifier};
use haven_repository::{HavenRepository, MemoryRepository, PostgresRepository};
use tracing::{info, warn};

use crate::auth::JwtAuthenticator;
use crate::config::{AppConfig, StorageBackend};
use crate::errors::{ConfigError, StartupError};

/// `Dependencies` holds the components the HTTP layer needs.
///
/// It includes the interaction ledger, the repository used to resolve bearer
/// tokens to actors, and the token authenticator.
pub struct Dependencies {
    pub ledger: InteractionLedger,
    pub repository: Arc<dyn HavenRepository>,
    pub authenticator: JwtAuthenticator,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance.
    ///
    /// Connects to PostgreSQL and applies migrations, or builds an in-memory
    /// store when `HAVEN_STORAGE=memory`.
    ///
    /// # Arguments
    ///
    /// * `config` - Settings read from the environment
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or a
    /// `StartupError` if the store cannot be reached or migrated.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let repository: Arc<dyn HavenRepository> = match config.storage {
            StorageBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let repository =
                    PostgresRepository::connect(database_url, config.database_max_connections).await?;
                info!(max_connections = config.database_max_connections, "Connected to PostgreSQL");
                Arc::new(repository)
            }
            StorageBackend::Memory => {
                warn!("Using in-memory storage, records are lost on restart");
                Arc::new(MemoryRepository::new())
            }
        };

        Ok(Self::with_repository(repository, config))
    }

    /// Wires the ledger over an already built repository.
    pub fn with_repository(repository: Arc<dyn HavenRepository>, config: &AppConfig) -> Self {
        let ledger = InteractionLedger::new(
            repository.clone(),
            Arc::new(TracingNotifier),
            config.ledger_config(),
        );

        Self {
            ledger,
            repository,
            authenticator: JwtAuthenticator::new(&config.jwt_secret),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;
    use haven_ledger::RatingScope;

    fn config(storage: StorageBackend, database_url: Option<&str>) -> AppConfig {
        AppConfig {
            storage,
            database_url: database_url.map(str::to_string),
            database_max_connections: 1,
            host: [127, 0, 0, 1].into(),
            port: 0,
            jwt_secret: "a-test-secret-that-is-long-enough-to-sign".into(),
            rating_scope: RatingScope::Global,
            log_format: LogFormat::Pretty,
        }
    }

    #[tokio::test]
    async fn test_memory_dependencies() {
        let dependencies = Dependencies::new(&config(StorageBackend::Memory, None)).await.unwrap();
        assert_eq!(dependencies.ledger.config().rating_scope, RatingScope::Global);
    }

    #[tokio::test]
    async fn test_postgres_without_url() {
        let result = Dependencies::new(&config(StorageBackend::Postgres, None)).await;
        assert!(matches!(result, Err(StartupError::Config(ConfigError::Missing("DATABASE_URL")))));
    }

    #[tokio::test]
    async fn test_invalid_database_url() {
        let result = Dependencies::new(&config(StorageBackend::Postgres, Some("invalid-database-url"))).await;
        assert!(matches!(result, Err(StartupError::Repository(_))));
    }
}
