mod sighting_record;
mod sighting_stats;

pub use sighting_record::{ClassificationOutcome, NewSighting, SightingRecord};
pub use sighting_stats::SightingStats;
