//! `photos` table layout and the in-place upgrade of databases created by older bot versions.
//!
//! Older databases hold a `photos` table with only `id, photo_id, photo_path, latitude, longitude`
//! (sometimes `user_id`). Those are rebuilt into the current layout; current tables are left alone.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StorageError;

pub(crate) const TABLE: &str = "photos";

const COLUMNS_DDL: &str = r#"
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL DEFAULT 0,
    photo_id TEXT NOT NULL,
    photo_path TEXT NOT NULL,
    latitude REAL,
    longitude REAL,
    file_exists INTEGER DEFAULT 1,
    classified INTEGER DEFAULT 0,
    classification_success INTEGER DEFAULT 0,
    classification_1_model TEXT,
    classification_1_class TEXT,
    classification_1_probability REAL,
    classification_2_model TEXT,
    classification_2_class TEXT,
    classification_2_probability REAL,
    timestamp DATETIME DEFAULT CURRENT_TIMESTAMP
"#;

/// Columns whose absence marks a legacy table.
const REQUIRED_COLUMNS: [&str; 2] = ["user_id", "classified"];

/// What [`migrate`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// No `photos` table yet.
    NoTable,
    /// Table already has the current layout.
    UpToDate,
    /// Legacy table rebuilt; carries the number of copied rows.
    Rebuilt(u64),
}

pub(crate) fn create_table_sql(name: &str) -> String {
    format!("CREATE TABLE IF NOT EXISTS {name} ({COLUMNS_DDL})")
}

pub(crate) async fn table_columns(pool: &SqlitePool, table: &str) -> Result<Vec<String>, sqlx::Error> {
    let columns: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info(?)")
        .bind(table)
        .fetch_all(pool)
        .await?;
    Ok(columns.into_iter().map(|c| c.0).collect())
}

/// Creates the `photos` table and its indexes if missing.
pub(crate) async fn create(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(&create_table_sql(TABLE)).execute(pool).await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_user_id ON photos(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_photo_id ON photos(photo_id, user_id)")
        .execute(pool)
        .await?;
    Ok(())
}

/// Rebuilds a legacy `photos` table into the current layout inside one transaction.
///
/// Copies `id, photo_id, photo_path, latitude, longitude` and `user_id` when the legacy table has
/// it (0 otherwise); every other column takes its default.
pub(crate) async fn migrate(pool: &SqlitePool) -> Result<MigrationOutcome, StorageError> {
    let columns = table_columns(pool, TABLE).await?;
    if columns.is_empty() {
        return Ok(MigrationOutcome::NoTable);
    }
    if REQUIRED_COLUMNS
        .iter()
        .all(|required| columns.iter().any(|c| c == required))
    {
        return Ok(MigrationOutcome::UpToDate);
    }

    info!(columns = ?columns, "Legacy photos table detected, rebuilding");

    let pick = |name: &str, fallback: &str| -> String {
        if columns.iter().any(|c| c == name) {
            name.to_string()
        } else {
            fallback.to_string()
        }
    };
    let copy_sql = format!(
        "INSERT INTO new_photos (id, user_id, photo_id, photo_path, latitude, longitude) \
         SELECT id, {}, photo_id, photo_path, {}, {} FROM photos",
        pick("user_id", "0"),
        pick("latitude", "NULL"),
        pick("longitude", "NULL"),
    );

    let mut tx = pool.begin().await?;
    sqlx::query("DROP TABLE IF EXISTS new_photos")
        .execute(&mut *tx)
        .await?;
    sqlx::query(&create_table_sql("new_photos"))
        .execute(&mut *tx)
        .await?;
    let copied = sqlx::query(&copy_sql).execute(&mut *tx).await?.rows_affected();
    sqlx::query("DROP TABLE photos").execute(&mut *tx).await?;
    sqlx::query("ALTER TABLE new_photos RENAME TO photos")
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!(copied = copied, "Legacy photos table rebuilt");
    Ok(MigrationOutcome::Rebuilt(copied))
}
