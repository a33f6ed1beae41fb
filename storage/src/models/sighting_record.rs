//! Sighting row model and the inputs used to create and update it.
//!
//! Maps to the `photos` table and is used by SightingRepository.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the `photos` table.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SightingRecord {
    pub id: i64,
    pub user_id: i64,
    pub photo_id: String,
    pub photo_path: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub file_exists: bool,
    pub classified: bool,
    pub classification_success: bool,
    pub classification_1_model: Option<String>,
    pub classification_1_class: Option<String>,
    pub classification_1_probability: Option<f64>,
    pub classification_2_model: Option<String>,
    pub classification_2_class: Option<String>,
    pub classification_2_probability: Option<f64>,
    /// UTC, set by the database on insert.
    pub timestamp: NaiveDateTime,
}

impl SightingRecord {
    pub fn is_geotagged(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

/// A freshly downloaded photo, before classification and geotagging.
#[derive(Debug, Clone)]
pub struct NewSighting {
    pub user_id: i64,
    pub photo_id: String,
    pub photo_path: String,
}

/// Result of running the primary classifier on a sighting.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationOutcome {
    pub model: String,
    pub class_name: String,
    pub probability: f64,
    /// Probability cleared the confidence threshold.
    pub success: bool,
}
