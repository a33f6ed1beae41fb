//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

use crate::error::StorageError;

const MEMORY_URL: &str = "sqlite::memory:";

/// Manages a single SQLite pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL.
    ///
    /// Accepts a plain file path, `file:<path>`, `sqlite://<path>` or `sqlite::memory:`.
    /// The in-memory variant is limited to one connection so every query sees the same database.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        info!(database_url = %database_url, "Initializing SQLite pool");

        let (options, max_connections) = connect_options(database_url)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn connect_options(database_url: &str) -> Result<(SqliteConnectOptions, u32), StorageError> {
    if database_url == MEMORY_URL {
        let options = SqliteConnectOptions::from_str(MEMORY_URL)
            .map_err(|e| StorageError::InvalidUrl(e.to_string()))?;
        return Ok((options, 1));
    }

    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .or_else(|| database_url.strip_prefix("file:"))
        .unwrap_or(database_url);

    if path.is_empty() {
        return Err(StorageError::InvalidUrl(database_url.to_string()));
    }

    let options = SqliteConnectOptions::new()
        .create_if_missing(true)
        .filename(path);
    Ok((options, 5))
}
