//! Tunable weights and result types for popularity scoring.

use pubpulse_core::PopularityResult;

/// Additive scoring terms and thresholds.
///
/// Defaults reproduce the production heuristic; individual terms can be
/// tuned without touching the scoring code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Score granted per recent visit.
    pub activity_weight: f64,
    /// Ceiling on the total activity contribution.
    pub activity_cap: f64,
    /// Flat contribution granted to every open venue.
    pub base: f64,
    /// Bonus inside the evening window (17:00 to 23:59).
    pub evening_bonus: f64,
    /// Bonus for weekend lunchtime (12:00 to 14:59 on Saturday or Sunday).
    pub weekend_lunch_bonus: f64,
    /// Bonus from 18:00 onwards on Friday and Saturday.
    pub weekend_evening_bonus: f64,
    /// Extra late-night bonus (21:00 to 23:59 on Friday and Saturday).
    pub late_night_bonus: f64,
    /// Half-width of the uniform jitter drawn for every open venue.
    pub jitter_amplitude: f64,
    /// Raw-score threshold a venue must exceed to be marked hot.
    pub hot_threshold: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            activity_weight: 15.0,
            activity_cap: 40.0,
            base: 20.0,
            evening_bonus: 25.0,
            weekend_lunch_bonus: 20.0,
            weekend_evening_bonus: 30.0,
            late_night_bonus: 15.0,
            jitter_amplitude: 7.5,
            hot_threshold: 75.0,
        }
    }
}

/// Outcome of scoring one venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenueScore {
    /// Popularity score clamped into `0..=100`.
    pub score: u8,
    /// Whether the venue qualified as hot.
    pub hot_now: bool,
    /// Whether the venue was open at the scoring instant.
    pub open: bool,
}

/// Aggregate outcome of one scoring batch.
///
/// The per-venue results are always complete: a venue whose write failed
/// still appears in `results`, it just is not durably stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// One result per input venue, in input order.
    pub results: Vec<PopularityResult>,
    /// Venues found open.
    pub open_count: usize,
    /// Venues found closed.
    pub closed_count: usize,
    /// Results persisted successfully.
    pub persisted_count: usize,
    /// Results whose write failed.
    pub failed_count: usize,
    /// True when the activity fetch failed and every venue was scored with
    /// zero recent visits.
    pub activity_degraded: bool,
}
