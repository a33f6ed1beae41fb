//! Sighting repository: persistence and queries for user photos, geotags and classifications.
//!
//! Uses SqlitePoolManager and the models (SightingRecord, NewSighting, ClassificationOutcome, SightingStats).
//! External: SQLite via sqlx; the bot handlers and the CLI call into it.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::{info, warn};

use crate::error::StorageError;
use crate::models::{ClassificationOutcome, NewSighting, SightingRecord, SightingStats};
use crate::schema::{self, MigrationOutcome};
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SightingRepository {
    pool_manager: SqlitePoolManager,
}

impl SightingRepository {
    /// Opens the database, upgrades a legacy `photos` table and creates missing tables.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        let outcome = repo.migrate().await?;
        info!(outcome = ?outcome, "Database migration checked");
        repo.init().await?;
        Ok(repo)
    }

    /// Rebuilds a legacy `photos` table into the current layout. No-op on current tables.
    pub async fn migrate(&self) -> Result<MigrationOutcome, StorageError> {
        schema::migrate(self.pool_manager.pool()).await
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating database tables if not exist");
        schema::create(self.pool_manager.pool()).await?;
        info!("Database tables created successfully");
        Ok(())
    }

    /// True when this user already uploaded the photo.
    pub async fn exists(&self, user_id: i64, photo_id: &str) -> Result<bool, StorageError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT photo_id FROM photos WHERE photo_id = ? AND user_id = ?")
                .bind(photo_id)
                .bind(user_id)
                .fetch_optional(self.pool_manager.pool())
                .await?;
        Ok(row.is_some())
    }

    /// Inserts a new sighting and returns its row id.
    pub async fn insert(&self, sighting: &NewSighting) -> Result<i64, StorageError> {
        let result =
            sqlx::query("INSERT INTO photos (user_id, photo_id, photo_path) VALUES (?, ?, ?)")
                .bind(sighting.user_id)
                .bind(&sighting.photo_id)
                .bind(&sighting.photo_path)
                .execute(self.pool_manager.pool())
                .await?;

        let id = result.last_insert_rowid();
        info!(
            id = id,
            user_id = sighting.user_id,
            photo_id = %sighting.photo_id,
            photo_path = %sighting.photo_path,
            "Saved sighting"
        );
        Ok(id)
    }

    /// Stores the primary classifier result for the user's photo. Returns the number of rows updated.
    pub async fn record_classification(
        &self,
        user_id: i64,
        photo_id: &str,
        outcome: &ClassificationOutcome,
    ) -> Result<u64, StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE photos
            SET classified = 1,
                classification_success = ?,
                classification_1_model = ?,
                classification_1_class = ?,
                classification_1_probability = ?
            WHERE photo_id = ? AND user_id = ?
            "#,
        )
        .bind(outcome.success)
        .bind(&outcome.model)
        .bind(&outcome.class_name)
        .bind(outcome.probability)
        .bind(photo_id)
        .bind(user_id)
        .execute(self.pool_manager.pool())
        .await?;

        info!(
            user_id = user_id,
            photo_id = %photo_id,
            class_name = %outcome.class_name,
            probability = outcome.probability,
            success = outcome.success,
            "Recorded classification"
        );
        Ok(result.rows_affected())
    }

    /// Id of the user's most recent sighting without a geotag.
    pub async fn latest_untagged(&self, user_id: i64) -> Result<Option<i64>, StorageError> {
        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM photos WHERE user_id = ? AND latitude IS NULL ORDER BY id DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Sets the geotag of a sighting. Returns false when no row has that id.
    pub async fn attach_location(
        &self,
        id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE photos SET latitude = ?, longitude = ? WHERE id = ?")
            .bind(latitude)
            .bind(longitude)
            .bind(id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Geotags the user's most recent untagged sighting in one transaction.
    /// Returns the tagged row id, or `None` when every sighting of the user is already tagged.
    pub async fn tag_latest_untagged(
        &self,
        user_id: i64,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<i64>, StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;

        let row: Option<(i64,)> = sqlx::query_as(
            "SELECT id FROM photos WHERE user_id = ? AND latitude IS NULL ORDER BY id DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((id,)) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("UPDATE photos SET latitude = ?, longitude = ? WHERE id = ?")
            .bind(latitude)
            .bind(longitude)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!(
            id = id,
            user_id = user_id,
            latitude = latitude,
            longitude = longitude,
            "Geotag saved"
        );
        Ok(Some(id))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<SightingRecord>, StorageError> {
        let record = sqlx::query_as::<_, SightingRecord>("SELECT * FROM photos WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool_manager.pool())
            .await?;
        Ok(record)
    }

    /// The user's sightings, newest first.
    pub async fn list_by_user(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<SightingRecord>, StorageError> {
        let records = sqlx::query_as::<_, SightingRecord>(
            "SELECT * FROM photos WHERE user_id = ? ORDER BY id DESC LIMIT ?",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(self.pool_manager.pool())
        .await?;

        info!(
            user_id = user_id,
            count = records.len(),
            "Retrieved sightings for user"
        );
        Ok(records)
    }

    /// Aggregate counts over all sightings, or over one user's when `user_id` is set.
    pub async fn get_stats(&self, user_id: Option<i64>) -> Result<SightingStats, StorageError> {
        #[allow(clippy::type_complexity)]
        let row: (
            i64,
            i64,
            i64,
            i64,
            i64,
            Option<NaiveDateTime>,
            Option<NaiveDateTime>,
        ) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COALESCE(SUM(classified), 0),
                   COALESCE(SUM(classification_success), 0),
                   COUNT(latitude),
                   COUNT(DISTINCT user_id),
                   MIN(timestamp),
                   MAX(timestamp)
            FROM photos
            WHERE (? IS NULL OR user_id = ?)
            "#,
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_one(self.pool_manager.pool())
        .await?;

        Ok(SightingStats {
            total: row.0,
            classified: row.1,
            identified: row.2,
            geotagged: row.3,
            unique_users: row.4,
            first_sighting: row.5,
            last_sighting: row.6,
        })
    }

    /// Marks sightings whose photo file is gone from disk (`file_exists = 0`). Returns how many were marked.
    /// Relative `photo_path` values are resolved against `base_dir`, the directory the bot ran in.
    pub async fn mark_missing_files(&self, base_dir: &Path) -> Result<u64, StorageError> {
        let pool = self.pool_manager.pool();
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, photo_path FROM photos WHERE file_exists = 1")
                .fetch_all(pool)
                .await?;

        let mut marked = 0;
        for (id, photo_path) in rows {
            if base_dir.join(&photo_path).exists() {
                continue;
            }
            warn!(id = id, photo_path = %photo_path, "Photo file missing");
            marked += sqlx::query("UPDATE photos SET file_exists = 0 WHERE id = ?")
                .bind(id)
                .execute(pool)
                .await?
                .rows_affected();
        }

        info!(marked = marked, "Photo file audit finished");
        Ok(marked)
    }
}
