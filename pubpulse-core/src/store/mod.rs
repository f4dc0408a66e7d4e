//! Storage interface between the engine and the venue database.
//!
//! The scorer borrows a snapshot of venues from the caller, reads aggregated
//! recent visit counts through [`VenueStore::fetch_recent_activity`], and
//! writes one [`PopularityResult`] per venue back through
//! [`VenueStore::update_popularity`]. Writes are independent of each other:
//! a failing venue must not prevent the rest of a batch from persisting.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use thiserror::Error;

#[cfg(feature = "store-sqlite")]
mod sqlite;
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteVenueStore, SqliteVenueStoreError};

/// Aggregated recent visit counts keyed by venue id.
///
/// Venues without recorded visits are simply absent; [`ActivityCounts::count`]
/// reports zero for them.
///
/// # Examples
/// ```
/// use pubpulse_core::ActivityCounts;
///
/// let counts: ActivityCounts = [("pub-1".to_owned(), 3)].into_iter().collect();
/// assert_eq!(counts.count("pub-1"), 3);
/// assert_eq!(counts.count("pub-2"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityCounts {
    counts: BTreeMap<String, u32>,
}

impl ActivityCounts {
    /// Construct from pre-aggregated counts.
    #[must_use]
    pub fn new(counts: BTreeMap<String, u32>) -> Self {
        Self { counts }
    }

    /// Record one further visit for `venue_id`.
    pub fn record(&mut self, venue_id: &str) {
        *self.counts.entry(venue_id.to_owned()).or_insert(0) += 1;
    }

    /// Return the recorded count for a venue, zero when absent.
    #[must_use]
    pub fn count(&self, venue_id: &str) -> u32 {
        self.counts.get(venue_id).copied().unwrap_or(0)
    }

    /// Number of venues with at least one recorded visit.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Report whether no visits were recorded at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total visits recorded across all venues.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }
}

impl FromIterator<(String, u32)> for ActivityCounts {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Outcome of scoring one venue, persisted via
/// [`VenueStore::update_popularity`].
///
/// Every run overwrites the previously stored values; nothing accumulates
/// across batches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopularityResult {
    /// Venue the result belongs to.
    pub venue_id: String,
    /// Popularity score clamped into `0..=100`.
    pub score: u8,
    /// Whether the venue is currently trending.
    pub hot_now: bool,
    /// Instant the computation ran.
    pub checked_at: DateTime<Utc>,
}

/// Errors surfaced by [`VenueStore`] implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading aggregated visit activity failed.
    #[error("failed to fetch recent visit activity")]
    FetchActivity {
        /// Backend failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Writing a venue's popularity columns failed.
    #[error("failed to update venue {venue_id}")]
    UpdateVenue {
        /// Venue whose write failed.
        venue_id: String,
        /// Backend failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The venue targeted by an update does not exist.
    #[error("venue {venue_id} does not exist")]
    UnknownVenue {
        /// Identifier that matched no stored venue.
        venue_id: String,
    },
}

/// Read/write access to the venue database.
///
/// Implementations back onto whatever holds the venue records; the engine
/// only ever reads one activity snapshot per batch and issues independent
/// per-venue writes. Visits recorded while a batch is running belong to the
/// next run.
pub trait VenueStore {
    /// Aggregate visit events recorded at or after `since`, by venue.
    ///
    /// # Errors
    /// Returns [`StoreError::FetchActivity`] when the backend read fails.
    fn fetch_recent_activity(&self, since: DateTime<Utc>) -> Result<ActivityCounts, StoreError>;

    /// Overwrite one venue's popularity columns.
    ///
    /// # Errors
    /// Returns [`StoreError::UnknownVenue`] when no venue matches
    /// `result.venue_id` and [`StoreError::UpdateVenue`] for backend write
    /// failures.
    fn update_popularity(&self, result: &PopularityResult) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn counts_aggregate_per_venue() {
        let mut counts = ActivityCounts::default();
        counts.record("pub-1");
        counts.record("pub-1");
        counts.record("pub-2");
        assert_eq!(counts.count("pub-1"), 2);
        assert_eq!(counts.count("pub-2"), 1);
        assert_eq!(counts.count("pub-3"), 0);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total(), 3);
    }

    #[rstest]
    fn empty_counts_report_zero_everywhere() {
        let counts = ActivityCounts::default();
        assert!(counts.is_empty());
        assert_eq!(counts.total(), 0);
        assert_eq!(counts.count("anything"), 0);
    }
}
