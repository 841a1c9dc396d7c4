//! Embedded Diesel migrations for the `jobs` schema.
//!
//! Migrations run over a short-lived synchronous `PgConnection`; async
//! callers should wrap these functions in `tokio::task::spawn_blocking`.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

/// Migrations compiled from `backend/migrations`.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying or reverting migrations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// The database could not be reached.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply or revert.
    #[error("migration failed: {message}")]
    Migration { message: String },
}

fn connect(database_url: &str) -> Result<PgConnection, MigrationError> {
    PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
        message: err.to_string(),
    })
}

/// Apply all pending migrations and return the versions that ran.
///
/// # Errors
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails.
pub fn run_pending_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = connect(database_url)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration {
            message: err.to_string(),
        })?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = applied.len(), versions = ?applied, "applied migrations");
    Ok(applied)
}

/// Revert every applied migration, dropping the `jobs` table.
///
/// # Errors
/// Returns [`MigrationError`] when the database is unreachable or a revert
/// fails.
pub fn revert_all_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut conn = connect(database_url)?;
    let reverted = conn
        .revert_all_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Migration {
            message: err.to_string(),
        })?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();
    info!(count = reverted.len(), versions = ?reverted, "reverted migrations");
    Ok(reverted)
}
