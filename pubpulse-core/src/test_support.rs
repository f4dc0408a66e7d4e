//! Test-only, in-memory [`VenueStore`] used by unit and behaviour tests.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};

use crate::store::{ActivityCounts, PopularityResult, StoreError, VenueStore};

/// In-memory [`VenueStore`] with scriptable failures.
///
/// Intended for small fixtures: activity counts are supplied up front and
/// successful writes are recorded for later assertions. The activity fetch
/// and individual venue updates can be made to fail deterministically.
///
/// # Examples
/// ```
/// use pubpulse_core::VenueStore;
/// use pubpulse_core::test_support::MemoryVenueStore;
///
/// let counts = [("pub-1".to_owned(), 2)].into_iter().collect();
/// let store = MemoryVenueStore::with_counts(counts);
/// let snapshot = store
///     .fetch_recent_activity(chrono::Utc::now())
///     .expect("fetch counts");
/// assert_eq!(snapshot.count("pub-1"), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryVenueStore {
    counts: ActivityCounts,
    fail_fetch: bool,
    failing_updates: BTreeSet<String>,
    written: RefCell<Vec<PopularityResult>>,
}

impl MemoryVenueStore {
    /// Store reporting the provided activity counts.
    #[must_use]
    pub fn with_counts(counts: ActivityCounts) -> Self {
        Self {
            counts,
            ..Self::default()
        }
    }

    /// Make every activity fetch fail.
    #[must_use]
    pub fn failing_fetch(mut self) -> Self {
        self.fail_fetch = true;
        self
    }

    /// Make updates for `venue_id` fail.
    #[must_use]
    pub fn failing_update(mut self, venue_id: &str) -> Self {
        self.failing_updates.insert(venue_id.to_owned());
        self
    }

    /// Results successfully written so far, in write order.
    #[must_use]
    pub fn written(&self) -> Vec<PopularityResult> {
        self.written.borrow().clone()
    }
}

impl VenueStore for MemoryVenueStore {
    fn fetch_recent_activity(&self, _since: DateTime<Utc>) -> Result<ActivityCounts, StoreError> {
        if self.fail_fetch {
            return Err(StoreError::FetchActivity {
                source: Box::new(ScriptedFailure("activity fetch disabled")),
            });
        }
        Ok(self.counts.clone())
    }

    fn update_popularity(&self, result: &PopularityResult) -> Result<(), StoreError> {
        if self.failing_updates.contains(&result.venue_id) {
            return Err(StoreError::UpdateVenue {
                venue_id: result.venue_id.clone(),
                source: Box::new(ScriptedFailure("update disabled")),
            });
        }
        self.written.borrow_mut().push(result.clone());
        Ok(())
    }
}

#[derive(Debug)]
struct ScriptedFailure(&'static str);

impl fmt::Display for ScriptedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl std::error::Error for ScriptedFailure {}
