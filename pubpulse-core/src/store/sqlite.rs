//! SQLite-backed reference implementation of [`VenueStore`].
//!
//! Venue metadata lives in a `venues` table carrying the popularity columns
//! the engine writes back; visit events append to a `visits` table. Weekly
//! hours are stored as one JSON object per venue. Timestamps are RFC 3339
//! text in UTC, so lexicographic comparison matches chronological order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use geo::Coord;
use rusqlite::Connection;
use thiserror::Error;

use super::{ActivityCounts, PopularityResult, StoreError, VenueStore};
use crate::hours::WeeklyHours;
use crate::venue::Venue;

/// Error raised when opening the database or loading the venue snapshot.
#[derive(Debug, Error)]
pub enum SqliteVenueStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Location of the database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The stored hours payload was not valid JSON.
    #[error("failed to parse opening hours for venue {venue_id}")]
    InvalidHours {
        /// Venue whose hours failed to parse.
        venue_id: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// Generic SQLite error while reading venue rows.
    #[error("database error")]
    Database {
        /// Source error raised by the SQLite driver.
        #[from]
        source: rusqlite::Error,
    },
}

/// [`VenueStore`] backed by a local SQLite database.
///
/// The store attaches to an existing database; schema ownership stays with
/// whatever system populates the venue and visit records.
#[derive(Debug)]
pub struct SqliteVenueStore {
    connection: Connection,
}

impl SqliteVenueStore {
    /// Open a store over an existing database file.
    ///
    /// # Errors
    /// Returns [`SqliteVenueStoreError::OpenDatabase`] when the file cannot
    /// be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SqliteVenueStoreError> {
        let db_path = path.as_ref().to_path_buf();
        let connection =
            Connection::open(&db_path).map_err(|source| SqliteVenueStoreError::OpenDatabase {
                path: db_path,
                source,
            })?;
        Ok(Self { connection })
    }

    /// Load the full venue snapshot, ordered by id.
    ///
    /// Callers hand the snapshot to the scorer; the scorer itself never
    /// fetches venues.
    ///
    /// # Errors
    /// Returns [`SqliteVenueStoreError::InvalidHours`] when a stored hours
    /// payload is not valid JSON, and [`SqliteVenueStoreError::Database`]
    /// for driver failures.
    pub fn load_venues(&self) -> Result<Vec<Venue>, SqliteVenueStoreError> {
        let mut statement = self
            .connection
            .prepare("SELECT id, name, lon, lat, opening_hours FROM venues ORDER BY id")?;
        let mut rows = statement.query([])?;
        let mut venues = Vec::new();

        while let Some(row) = rows.next()? {
            let id: String = row.get(0)?;
            let name: String = row.get(1)?;
            let lon: f64 = row.get(2)?;
            let lat: f64 = row.get(3)?;
            let hours_json: Option<String> = row.get(4)?;
            let hours = hours_json
                .map(|payload| serde_json::from_str::<WeeklyHours>(&payload))
                .transpose()
                .map_err(|source| SqliteVenueStoreError::InvalidHours {
                    venue_id: id.clone(),
                    source,
                })?;
            venues.push(Venue {
                id,
                name,
                location: Coord { x: lon, y: lat },
                hours,
            });
        }

        Ok(venues)
    }
}

impl VenueStore for SqliteVenueStore {
    fn fetch_recent_activity(&self, since: DateTime<Utc>) -> Result<ActivityCounts, StoreError> {
        let mut statement = self
            .connection
            .prepare("SELECT venue_id, COUNT(*) FROM visits WHERE occurred_at >= ?1 GROUP BY venue_id")
            .map_err(fetch_error)?;
        let mut rows = statement
            .query([since.to_rfc3339()])
            .map_err(fetch_error)?;

        let mut counts = BTreeMap::new();
        while let Some(row) = rows.next().map_err(fetch_error)? {
            let venue_id: String = row.get(0).map_err(fetch_error)?;
            let visits: i64 = row.get(1).map_err(fetch_error)?;
            counts.insert(venue_id, u32::try_from(visits).unwrap_or(u32::MAX));
        }
        Ok(ActivityCounts::new(counts))
    }

    fn update_popularity(&self, result: &PopularityResult) -> Result<(), StoreError> {
        let changed = self
            .connection
            .execute(
                "UPDATE venues
                 SET popularity_score = ?1, hot_now = ?2, last_popularity_check = ?3
                 WHERE id = ?4",
                (
                    result.score,
                    result.hot_now,
                    result.checked_at.to_rfc3339(),
                    &result.venue_id,
                ),
            )
            .map_err(|source| StoreError::UpdateVenue {
                venue_id: result.venue_id.clone(),
                source: Box::new(source),
            })?;

        if changed == 0 {
            return Err(StoreError::UnknownVenue {
                venue_id: result.venue_id.clone(),
            });
        }
        Ok(())
    }
}

fn fetch_error(source: rusqlite::Error) -> StoreError {
    StoreError::FetchActivity {
        source: Box::new(source),
    }
}
