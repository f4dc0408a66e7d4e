//! Behavioural coverage for full scoring batches.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use geo::Coord;
use pubpulse_core::test_support::MemoryVenueStore;
use pubpulse_core::{ActivityCounts, Venue, WeeklyHours};
use pubpulse_scorer::{NoJitter, ScoreWeights, update_popularity_scores};
use rstest::rstest;

// 2026-08-03 is a Monday; days 3..=9 cover Monday through Sunday.
fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, day, hour, minute, 0)
        .single()
        .expect("valid timestamp")
}

fn open_venue(id: &str) -> Venue {
    Venue::always_open(id, "The Anchor", Coord { x: -0.1, y: 51.5 })
}

fn closed_venue(id: &str) -> Venue {
    Venue::new(
        id,
        "The Grapes",
        Coord { x: -0.1, y: 51.5 },
        WeeklyHours::default(),
    )
}

#[rstest]
fn failing_writes_are_tallied_but_never_abort_the_batch() {
    let venues = vec![
        open_venue("a"),
        open_venue("b"),
        open_venue("c"),
        open_venue("d"),
    ];
    let store = MemoryVenueStore::default()
        .failing_update("b")
        .failing_update("d");

    let report = update_popularity_scores(
        &store,
        &venues,
        &at(3, 10, 0),
        &ScoreWeights::default(),
        &mut NoJitter,
    );

    assert_eq!(report.persisted_count, 2);
    assert_eq!(report.failed_count, 2);

    // Every venue still gets a result, in input order.
    let returned: Vec<&str> = report
        .results
        .iter()
        .map(|result| result.venue_id.as_str())
        .collect();
    assert_eq!(returned, vec!["a", "b", "c", "d"]);

    let written: Vec<String> = store
        .written()
        .into_iter()
        .map(|result| result.venue_id)
        .collect();
    assert_eq!(written, vec!["a".to_owned(), "c".to_owned()]);
}

#[rstest]
fn fetch_failure_degrades_to_zero_counts() {
    let counts: ActivityCounts = [("a".to_owned(), 5)].into_iter().collect();
    let store = MemoryVenueStore::with_counts(counts).failing_fetch();
    let venues = vec![open_venue("a"), open_venue("b")];

    let report = update_popularity_scores(
        &store,
        &venues,
        &at(3, 10, 0),
        &ScoreWeights::default(),
        &mut NoJitter,
    );

    assert!(report.activity_degraded);
    // Without counts, both venues land on the flat base contribution.
    for result in &report.results {
        assert_eq!(result.score, 20);
        assert!(!result.hot_now);
    }
}

#[rstest]
fn recent_activity_feeds_each_venue_independently() {
    let counts: ActivityCounts = [("a".to_owned(), 2)].into_iter().collect();
    let store = MemoryVenueStore::with_counts(counts);
    let venues = vec![open_venue("a"), open_venue("b")];

    let report = update_popularity_scores(
        &store,
        &venues,
        &at(3, 10, 0),
        &ScoreWeights::default(),
        &mut NoJitter,
    );

    assert!(!report.activity_degraded);
    assert_eq!(report.results[0].score, 50);
    assert_eq!(report.results[1].score, 20);
}

#[rstest]
fn open_and_closed_venues_are_tallied_separately() {
    let store = MemoryVenueStore::default();
    let venues = vec![open_venue("a"), closed_venue("b"), open_venue("c")];

    let report = update_popularity_scores(
        &store,
        &venues,
        &at(7, 19, 0),
        &ScoreWeights::default(),
        &mut NoJitter,
    );

    assert_eq!(report.open_count, 2);
    assert_eq!(report.closed_count, 1);
    assert_eq!(report.results[1].score, 0);
    assert!(!report.results[1].hot_now);
}

#[rstest]
fn busy_weekend_venues_come_back_hot() {
    let counts: ActivityCounts = [("a".to_owned(), 3)].into_iter().collect();
    let store = MemoryVenueStore::with_counts(counts);
    let venues = vec![open_venue("a")];

    let report = update_popularity_scores(
        &store,
        &venues,
        &at(8, 21, 30),
        &ScoreWeights::default(),
        &mut NoJitter,
    );

    assert_eq!(report.results[0].score, 100);
    assert!(report.results[0].hot_now);
}

#[rstest]
fn results_are_stamped_with_the_run_instant_in_utc() {
    let store = MemoryVenueStore::default();
    let venues = vec![open_venue("a")];
    let offset = FixedOffset::east_opt(3600).expect("valid offset");
    let local_now = offset
        .with_ymd_and_hms(2026, 8, 7, 18, 0, 0)
        .single()
        .expect("valid timestamp");

    let report = update_popularity_scores(
        &store,
        &venues,
        &local_now,
        &ScoreWeights::default(),
        &mut NoJitter,
    );

    assert_eq!(report.results[0].checked_at, local_now.with_timezone(&Utc));
    // Heuristics key off the wall clock of the supplied instant: 18:00 on a
    // Friday earns the evening and weekend-evening bonuses.
    assert_eq!(report.results[0].score, 75);
}
