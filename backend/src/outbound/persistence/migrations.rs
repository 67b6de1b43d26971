//! Embedded schema migrations applied on `reload`.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

use crate::domain::ports::StorageError;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const RESET_SCHEMA: &str = "DROP SCHEMA public CASCADE; CREATE SCHEMA public;";

/// Applies the embedded migrations, optionally wiping the schema first.
#[derive(Debug, Clone)]
pub struct SchemaMigrator {
    database_url: String,
    reset: bool,
}

impl SchemaMigrator {
    /// With `reset` set every run drops and recreates the `public` schema.
    pub fn new(database_url: impl Into<String>, reset: bool) -> Self {
        Self {
            database_url: database_url.into(),
            reset,
        }
    }

    /// Run on a blocking thread with a synchronous connection.
    pub async fn apply(&self) -> Result<(), StorageError> {
        let url = self.database_url.clone();
        let reset = self.reset;
        tokio::task::spawn_blocking(move || migrate(&url, reset))
            .await
            .map_err(|err| StorageError::query(format!("migration task failed: {err}")))?
    }
}

fn migrate(url: &str, reset: bool) -> Result<(), StorageError> {
    let mut conn = PgConnection::establish(url)
        .map_err(|err| StorageError::connection(err.to_string()))?;
    if reset {
        warn!("dropping and recreating the public schema");
        conn.batch_execute(RESET_SCHEMA)
            .map_err(|err| StorageError::query(format!("schema reset: {err}")))?;
    }
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| StorageError::query(format!("migration: {err}")))?;
    info!(applied = applied.len(), "database schema up to date");
    Ok(())
}
