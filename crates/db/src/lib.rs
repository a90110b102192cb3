//! SQLite-backed cache of upstream game data.
//!
//! Repositories in [`repositories`] are thin, fallible query wrappers.
//! [`cache::CacheStore`] sits on top of them and implements the cache
//! contract used by the collector and the HTTP layer: writes report success
//! as a `bool`, reads degrade to `None` or an empty list, and every failure
//! is logged rather than propagated.

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

pub mod cache;
pub mod models;
pub mod repositories;

pub use cache::CacheStore;

pub type DbPool = sqlx::SqlitePool;

/// Upper bound on pooled connections to a file database.
const MAX_CONNECTIONS: u32 = 8;

/// How long a writer waits on SQLite's lock before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a connection pool from a database URL.
///
/// File databases are created if missing and opened in WAL mode so readers
/// never block the collector's writes. An in-memory database is pinned to a
/// single long-lived connection, since every new connection would otherwise
/// see its own empty database.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let in_memory = database_url.contains(":memory:");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(MAX_CONNECTIONS)
    };

    pool_options.connect_with(options).await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
