//! Batch scoring and persistence.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use log::{info, warn};
use pubpulse_core::{ActivityCounts, PopularityResult, Venue, VenueStore};

use crate::jitter::JitterSource;
use crate::types::{BatchReport, ScoreWeights};
use crate::{ACTIVITY_LOOKBACK_HOURS, score_venue};

/// Score every venue in the snapshot and persist the results.
///
/// The activity read happens exactly once, before any scoring, and the
/// returned counts are treated as an immutable snapshot: visits arriving
/// while the batch runs belong to the next run. When the read fails the
/// batch does not abort; it proceeds with zero counts for every venue and
/// flags the report as degraded.
///
/// Each venue then scores and persists independently. A failed write is
/// tallied and logged but never stops the batch, and the computed result is
/// still returned to the caller. Results come back in input order, stamped
/// with `now` converted to UTC.
pub fn update_popularity_scores<S, Tz>(
    store: &S,
    venues: &[Venue],
    now: &DateTime<Tz>,
    weights: &ScoreWeights,
    jitter: &mut dyn JitterSource,
) -> BatchReport
where
    S: VenueStore + ?Sized,
    Tz: TimeZone,
{
    let checked_at = now.with_timezone(&Utc);
    info!("updating popularity for {} venues", venues.len());

    let since = checked_at - TimeDelta::hours(ACTIVITY_LOOKBACK_HOURS);
    let (counts, activity_degraded) = match store.fetch_recent_activity(since) {
        Ok(counts) => {
            info!("found {} recent visits", counts.total());
            (counts, false)
        }
        Err(err) => {
            warn!("could not fetch recent visits, scoring with zero counts: {err}");
            (ActivityCounts::default(), true)
        }
    };

    let mut report = BatchReport {
        results: Vec::with_capacity(venues.len()),
        open_count: 0,
        closed_count: 0,
        persisted_count: 0,
        failed_count: 0,
        activity_degraded,
    };

    for venue in venues {
        let scored = score_venue(venue, counts.count(&venue.id), now, weights, jitter);
        if scored.open {
            report.open_count += 1;
        } else {
            report.closed_count += 1;
        }

        let result = PopularityResult {
            venue_id: venue.id.clone(),
            score: scored.score,
            hot_now: scored.hot_now,
            checked_at,
        };
        match store.update_popularity(&result) {
            Ok(()) => report.persisted_count += 1,
            Err(err) => {
                warn!("failed to update venue {}: {err}", venue.id);
                report.failed_count += 1;
            }
        }
        report.results.push(result);
    }

    info!(
        "popularity batch finished: {} open, {} closed, {} saved, {} failed",
        report.open_count, report.closed_count, report.persisted_count, report.failed_count
    );
    report
}
