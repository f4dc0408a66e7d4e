//! Popularity scoring for Pubpulse venues.
//!
//! The crate turns a snapshot of venues plus recent visit activity into one
//! bounded popularity score and a "hot now" flag per venue:
//!
//! - [`score_venue`] is the pure per-venue computation: closed venues short
//!   circuit to zero, open venues accumulate an activity term and
//!   time-of-day bonuses plus a bounded random jitter, and the sum clamps
//!   into `0..=100`.
//! - [`update_popularity_scores`] runs a whole batch: one snapshot read of
//!   recent activity, independent per-venue persistence, and tallies for
//!   the run (see [`BatchReport`]).
//! - [`should_run`] is the cheap gate a scheduler consults between runs.
//!
//! Current time and randomness are explicit inputs so every computation can
//! be replayed exactly in tests.
//!
//! # Examples
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use geo::Coord;
//! use pubpulse_core::Venue;
//! use pubpulse_scorer::{NoJitter, ScoreWeights, score_venue};
//!
//! let venue = Venue::always_open("pub-1", "The Anchor", Coord { x: -0.1, y: 51.5 });
//! // A quiet Monday morning earns the flat base contribution only.
//! let at = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
//! let scored = score_venue(&venue, 0, &at, &ScoreWeights::default(), &mut NoJitter);
//! assert_eq!(scored.score, 20);
//! assert!(!scored.hot_now);
//! ```

#![forbid(unsafe_code)]

use chrono::{DateTime, Datelike, TimeDelta, TimeZone, Timelike, Utc, Weekday};
use pubpulse_core::Venue;

mod batch;
mod jitter;
mod types;

pub use batch::update_popularity_scores;
pub use jitter::{JitterSource, NoJitter, SeededJitter};
pub use types::{BatchReport, ScoreWeights, VenueScore};

/// Trailing window, in hours, within which visits count as recent activity.
pub const ACTIVITY_LOOKBACK_HOURS: i64 = 4;

/// Minimum gap, in minutes, between batch runs enforced by [`should_run`].
pub const RUN_INTERVAL_MINUTES: i64 = 5;

/// Score a single venue at `at`.
///
/// Closed venues always score zero and are never hot, whatever their recent
/// activity. Open venues sum the activity contribution (capped), the flat
/// base, the applicable time-of-day bonuses and one jitter draw, then clamp
/// into `0..=100`. The hot flag keys off the raw sum before clamping and
/// rounding, and additionally requires at least one recent visit.
#[must_use]
pub fn score_venue<Tz: TimeZone>(
    venue: &Venue,
    recent_count: u32,
    at: &DateTime<Tz>,
    weights: &ScoreWeights,
    jitter: &mut dyn JitterSource,
) -> VenueScore {
    if !venue.is_open_at(at) {
        return VenueScore {
            score: 0,
            hot_now: false,
            open: false,
        };
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "the raw score is a float sum so the jitter term and hot threshold stay exact"
    )]
    let raw = raw_score(recent_count, at, weights) + jitter.sample(weights.jitter_amplitude);
    VenueScore {
        score: clamp_score(raw),
        hot_now: raw > weights.hot_threshold && recent_count > 0,
        open: true,
    }
}

/// Decide whether enough time has passed for another batch.
///
/// Returns `true` when no previous run is recorded, or when strictly more
/// than [`RUN_INTERVAL_MINUTES`] have elapsed since `last_run`. The gate has
/// no side effects; schedulers consult it before invoking
/// [`update_popularity_scores`].
#[must_use]
pub fn should_run(last_run: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    last_run.is_none_or(|last| {
        now.signed_duration_since(last) > TimeDelta::minutes(RUN_INTERVAL_MINUTES)
    })
}

#[expect(
    clippy::float_arithmetic,
    reason = "scoring sums weighted float terms before clamping"
)]
fn raw_score<Tz: TimeZone>(recent_count: u32, at: &DateTime<Tz>, weights: &ScoreWeights) -> f64 {
    let hour = at.hour();
    let day = at.weekday();
    let weekend = matches!(day, Weekday::Sat | Weekday::Sun);
    let friday_or_saturday = matches!(day, Weekday::Fri | Weekday::Sat);

    let mut score = weights.base;
    score += (f64::from(recent_count) * weights.activity_weight).min(weights.activity_cap);
    if (17..=23).contains(&hour) {
        score += weights.evening_bonus;
    }
    if (12..=14).contains(&hour) && weekend {
        score += weights.weekend_lunch_bonus;
    }
    if friday_or_saturday && hour >= 18 {
        score += weights.weekend_evening_bonus;
    }
    if (21..=23).contains(&hour) && friday_or_saturday {
        score += weights.late_night_bonus;
    }
    score
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the value is clamped into 0..=100 before the cast"
)]
fn clamp_score(raw: f64) -> u8 {
    raw.clamp(0.0, 100.0).round() as u8
}
