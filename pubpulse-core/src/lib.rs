//! Core domain types for the Pubpulse popularity engine.
//!
//! The crate models venues with free-text weekly opening hours, evaluates
//! whether a venue is open at a given instant, and defines the storage
//! interface the popularity scorer reads visit activity from and writes
//! results back to. All evaluation takes the current time as an explicit
//! argument; nothing in this crate reads a clock.

#![forbid(unsafe_code)]

pub mod hours;
pub mod store;
pub mod test_support;
pub mod venue;
pub mod walk;

pub use hours::{TimeRange, WeeklyHours, parse_day_entry};
pub use store::{ActivityCounts, PopularityResult, StoreError, VenueStore};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteVenueStore, SqliteVenueStoreError};
pub use venue::Venue;
