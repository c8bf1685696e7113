//! PostgreSQL implementation of the haven repository.
//!
//! Provides a PostgreSQL backend for every repository trait with connection
//! pooling and transaction safety.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - Check-then-act operations (vote toggle, highlight toggle, first read)
//!   wrapped in one transaction with row locks
//! - Unique constraints backing every "one per actor and article" rule
//! - Embedded migrations via `sqlx::migrate!`
//!
//! ## Database Tables
//!
//! - `actors`, `articles`, `comments`: the content being interacted with
//! - `votes`: one reaction per actor and target, keyed on `(actor_id, target_kind, target_id)`
//! - `ratings`, `favorites`, `bookmarks`, `highlights`: per-actor article interactions
//! - `reads_reports`, `article_reports`: read statistics and abuse reports
mod analytics;
mod articles;
mod interactions;
mod rows;

use sqlx::postgres::PgPoolOptions;

use crate::errors::RepositoryError;

/// Upper bound for retrying a toggle whose row vanished between statements.
const MAX_TOGGLE_ATTEMPTS: usize = 5;

/// PostgreSQL implementation of the haven repository.
#[derive(Clone)]
pub struct PostgresRepository {
    pool: sqlx::PgPool,
}

impl PostgresRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the schema applied
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool against `database_url` and applies pending migrations.
    ///
    /// # Arguments
    ///
    /// * `database_url` - PostgreSQL connection string
    /// * `max_connections` - Pool size
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresRepository)` - Ready-to-use repository instance
    /// * `Err(RepositoryError)` - Connection or migration failure
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        let repository = Self::new(pool);
        repository.migrate().await?;
        Ok(repository)
    }

    /// Applies the embedded migrations.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("src/postgres/migrations").run(&self.pool).await?;
        tracing::debug!("database migrations applied");
        Ok(())
    }
}
