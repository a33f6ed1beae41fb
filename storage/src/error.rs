//! Storage error types.
//!
//! Returned by [`crate::SightingRepository`] and the pool manager.

use thiserror::Error;

/// Errors that can occur when using storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Invalid database url: {0}")]
    InvalidUrl(String),
}
