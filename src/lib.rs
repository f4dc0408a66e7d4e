//! Facade crate for the Pubpulse popularity engine.
//!
//! This crate re-exports the core domain types and exposes the scorer and the
//! SQLite reference store behind feature flags.

#![forbid(unsafe_code)]

pub use pubpulse_core::{
    ActivityCounts, PopularityResult, StoreError, TimeRange, Venue, VenueStore, WeeklyHours,
    parse_day_entry,
};

#[cfg(feature = "store-sqlite")]
pub use pubpulse_core::{SqliteVenueStore, SqliteVenueStoreError};

#[cfg(feature = "scorer")]
pub use pubpulse_scorer::{
    BatchReport, JitterSource, NoJitter, ScoreWeights, SeededJitter, VenueScore, score_venue,
    should_run, update_popularity_scores,
};
