//! Storage crate: persistence of wildlife sightings (photo, geotag, classification) in SQLite.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – SightingRecord, NewSighting, ClassificationOutcome, SightingStats
//! - [`schema`] – `photos` table layout and legacy migration
//! - [`sighting_repo`] – SightingRepository (SQLite)
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod models;
mod schema;
mod sighting_repo;
mod sqlite_pool;


pub use error::StorageError;
pub use models::{ClassificationOutcome, NewSighting, SightingRecord, SightingStats};
pub use schema::MigrationOutcome;
pub use sighting_repo::SightingRepository;
pub use sqlite_pool::SqlitePoolManager;
