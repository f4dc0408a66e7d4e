//! Venues: identity, position and declared weekly opening hours.

use chrono::{DateTime, TimeZone};
use geo::Coord;

use crate::hours::WeeklyHours;

/// A venue eligible for popularity scoring.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`; they are
/// carried for callers presenting venues on a map and play no part in
/// scoring. Hours are optional: a venue that never declared any is treated
/// as always open.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use geo::Coord;
/// use pubpulse_core::Venue;
///
/// let venue = Venue::always_open("pub-1", "The Anchor", Coord { x: -0.1, y: 51.5 });
/// let small_hours = Utc.with_ymd_and_hms(2026, 3, 2, 3, 0, 0).unwrap();
/// assert!(venue.is_open_at(&small_hours));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Venue {
    /// Opaque identifier assigned by the backing store.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Declared weekly opening hours, if any.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub hours: Option<WeeklyHours>,
}

impl Venue {
    /// Construct a venue with the provided weekly hours.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coord<f64>,
        hours: WeeklyHours,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            hours: Some(hours),
        }
    }

    /// Construct a venue without declared hours.
    pub fn always_open(
        id: impl Into<String>,
        name: impl Into<String>,
        location: Coord<f64>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
            hours: None,
        }
    }

    /// Report whether the venue is open at `at`.
    ///
    /// Venues without declared hours are always open; otherwise the decision
    /// is delegated to [`WeeklyHours::is_open_at`].
    #[must_use]
    pub fn is_open_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        self.hours.as_ref().is_none_or(|hours| hours.is_open_at(at))
    }
}
