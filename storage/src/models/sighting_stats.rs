//! Aggregate statistics for sightings.
//!
//! Returned by SightingRepository::get_stats.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SightingStats {
    pub total: i64,
    /// Rows the classifier ran on.
    pub classified: i64,
    /// Rows classified above the confidence threshold.
    pub identified: i64,
    pub geotagged: i64,
    pub unique_users: i64,
    pub first_sighting: Option<NaiveDateTime>,
    pub last_sighting: Option<NaiveDateTime>,
}
