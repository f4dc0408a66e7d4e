//! Weekly opening hours and the open/closed evaluation.
//!
//! Hours arrive as free text, exactly as entered upstream: one optional entry
//! per weekday, each holding comma-separated ranges such as `"12:00pm-6:00pm"`
//! or `"11:30-14:00, 17:00-23:00"`. Parsing is deliberately forgiving: a
//! candidate that does not look like an hour range contributes no open window
//! instead of raising an error, so a venue whose whole entry is unparseable
//! simply counts as closed that day.

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use regex::Regex;

/// Minutes in a full day; also the close boundary meaning "end of day".
pub const MINUTES_PER_DAY: u16 = 1440;

const CLOSED_MARKER: &str = "closed";

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d{1,2}):(\d{2})\s*(?:am|pm)?\s*[-–]\s*(\d{1,2}):(\d{2})\s*(?:am|pm)?")
        .unwrap_or_else(|err| panic!("hour-range pattern failed to compile: {err}"))
});

/// Free-text opening hours, one optional entry per weekday.
///
/// An absent entry, or the literal `"closed"` in any case, closes the venue
/// for that day.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use pubpulse_core::WeeklyHours;
///
/// let hours = WeeklyHours {
///     friday: Some("17:00-23:00".into()),
///     ..WeeklyHours::default()
/// };
/// let friday_evening = Utc.with_ymd_and_hms(2026, 3, 6, 19, 0, 0).unwrap();
/// assert!(hours.is_open_at(&friday_evening));
/// let monday_noon = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
/// assert!(!hours.is_open_at(&monday_noon));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct WeeklyHours {
    /// Monday's entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub monday: Option<String>,
    /// Tuesday's entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub tuesday: Option<String>,
    /// Wednesday's entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub wednesday: Option<String>,
    /// Thursday's entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub thursday: Option<String>,
    /// Friday's entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub friday: Option<String>,
    /// Saturday's entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub saturday: Option<String>,
    /// Sunday's entry.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub sunday: Option<String>,
}

impl WeeklyHours {
    /// Return the entry for `day`, if present.
    #[must_use]
    pub fn entry(&self, day: Weekday) -> Option<&str> {
        let entry = match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        };
        entry.as_deref()
    }

    /// Report whether these hours leave the venue open at `at`.
    ///
    /// The day's entry is resolved from `at`'s weekday and the instant is
    /// compared against every parsed range until one contains it. Days with
    /// no entry, the `"closed"` marker, or nothing parseable are closed.
    #[must_use]
    pub fn is_open_at<Tz: TimeZone>(&self, at: &DateTime<Tz>) -> bool {
        let Some(entry) = self.entry(at.weekday()) else {
            return false;
        };
        if entry.eq_ignore_ascii_case(CLOSED_MARKER) {
            return false;
        }
        let minute = minute_of_day(at);
        parse_day_entry(entry)
            .iter()
            .any(|range| range.contains(minute))
    }
}

/// A parsed open/close pair in minutes from midnight.
///
/// A close strictly below the open denotes a range wrapping past midnight
/// into the next day; a close of [`MINUTES_PER_DAY`] marks the end-of-day
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    /// Opening minute of day, below [`MINUTES_PER_DAY`].
    pub open: u16,
    /// Closing minute of day, up to and including [`MINUTES_PER_DAY`].
    pub close: u16,
}

impl TimeRange {
    /// Report whether the range wraps past midnight into the next day.
    #[must_use]
    pub const fn wraps_midnight(&self) -> bool {
        self.close < self.open
    }

    /// Report whether `minute` falls inside the range, inclusive on both
    /// ends.
    #[must_use]
    pub const fn contains(&self, minute: u16) -> bool {
        if self.wraps_midnight() {
            minute >= self.open || minute <= self.close
        } else {
            self.open <= minute && minute <= self.close
        }
    }
}

/// Parse one day's free-text entry into zero or more time ranges.
///
/// The entry is split on commas and each trimmed candidate is matched
/// against `H:MM[am|pm] - H:MM[am|pm]` (hyphen or en dash separator,
/// meridiem markers optional). Candidates that do not match, or that
/// resolve outside a single day, are skipped rather than rejected.
///
/// Twelve-hour times are disambiguated per candidate, not per time: a
/// candidate containing `pm` shifts an open hour below 12 forward, and a
/// close hour below 12 that differs from the already-shifted open hour. A
/// lone `am` marker is never folded, so `12:30am` reads as half past noon;
/// upstream data has always been entered this way.
///
/// # Examples
/// ```
/// use pubpulse_core::parse_day_entry;
///
/// let ranges = parse_day_entry("11:30-14:00, 5:00pm-11:00pm");
/// assert_eq!(ranges.len(), 2);
/// assert_eq!((ranges[0].open, ranges[0].close), (690, 840));
/// assert_eq!((ranges[1].open, ranges[1].close), (1020, 1380));
///
/// assert!(parse_day_entry("noon till late").is_empty());
/// ```
#[must_use]
pub fn parse_day_entry(entry: &str) -> Vec<TimeRange> {
    entry
        .split(',')
        .filter_map(|candidate| parse_candidate(candidate.trim()))
        .collect()
}

fn parse_candidate(candidate: &str) -> Option<TimeRange> {
    let captures = RANGE_PATTERN.captures(candidate)?;
    let mut open_hour: u16 = field(&captures, 1)?;
    let open_minute: u16 = field(&captures, 2)?;
    let mut close_hour: u16 = field(&captures, 3)?;
    let close_minute: u16 = field(&captures, 4)?;

    if open_minute >= 60 || close_minute >= 60 {
        return None;
    }

    let afternoon = candidate.to_ascii_lowercase().contains("pm");
    if afternoon && open_hour < 12 {
        open_hour += 12;
    }
    // The close hour must differ from the shifted open hour so an explicit
    // "12" open does not drag the close forward twice.
    if afternoon && close_hour < 12 && close_hour != open_hour {
        close_hour += 12;
    }

    let open = open_hour * 60 + open_minute;
    let mut close = close_hour * 60 + close_minute;
    if close == 0 {
        close = MINUTES_PER_DAY;
    }
    if open >= MINUTES_PER_DAY || close > MINUTES_PER_DAY {
        return None;
    }
    Some(TimeRange { open, close })
}

fn field(captures: &regex::Captures<'_>, index: usize) -> Option<u16> {
    captures.get(index)?.as_str().parse().ok()
}

fn minute_of_day<Tz: TimeZone>(at: &DateTime<Tz>) -> u16 {
    (at.hour() * 60 + at.minute()) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    // 2026-08-03 is a Monday; day 3..=9 covers Monday through Sunday.
    fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, minute, 0)
            .single()
            .expect("valid timestamp")
    }

    fn monday_hours(entry: &str) -> WeeklyHours {
        WeeklyHours {
            monday: Some(entry.to_owned()),
            ..WeeklyHours::default()
        }
    }

    #[rstest]
    #[case("closed")]
    #[case("Closed")]
    #[case("CLOSED")]
    fn closed_marker_closes_the_day(#[case] entry: &str) {
        let hours = monday_hours(entry);
        assert!(!hours.is_open_at(&at(3, 12, 0)));
        assert!(!hours.is_open_at(&at(3, 20, 0)));
    }

    #[rstest]
    fn absent_entry_closes_the_day() {
        let hours = monday_hours("9:00-17:00");
        assert!(!hours.is_open_at(&at(4, 12, 0)));
    }

    #[rstest]
    #[case(23, 30, true)]
    #[case(14, 0, false)]
    fn overnight_range_spans_midnight(#[case] hour: u32, #[case] minute: u32, #[case] open: bool) {
        let hours = monday_hours("22:00-02:00");
        assert_eq!(hours.is_open_at(&at(3, hour, minute)), open);
    }

    #[rstest]
    fn overnight_range_covers_the_small_hours_of_the_same_weekday() {
        // The wrap comparison keys off the looked-up day's entry, so the
        // early-morning tail is honoured on the day carrying the entry.
        let hours = monday_hours("22:00-02:00");
        assert!(hours.is_open_at(&at(3, 1, 0)));
    }

    #[rstest]
    #[case(13, 0, true)]
    #[case(11, 0, false)]
    #[case(19, 0, false)]
    fn pm_range_is_shifted_into_the_afternoon(
        #[case] hour: u32,
        #[case] minute: u32,
        #[case] open: bool,
    ) {
        let hours = monday_hours("12:00pm-6:00pm");
        assert_eq!(hours.is_open_at(&at(3, hour, minute)), open);
    }

    #[rstest]
    fn multiple_ranges_fall_through_to_the_next_candidate() {
        let hours = monday_hours("11:30-14:00, 17:00-23:00");
        assert!(hours.is_open_at(&at(3, 12, 0)));
        assert!(hours.is_open_at(&at(3, 20, 0)));
        assert!(!hours.is_open_at(&at(3, 15, 0)));
    }

    #[rstest]
    fn malformed_candidates_are_skipped_not_fatal() {
        let hours = monday_hours("noon till late, 5:00pm-10:00pm");
        assert!(hours.is_open_at(&at(3, 18, 0)));
        assert!(!hours.is_open_at(&at(3, 12, 0)));
    }

    #[rstest]
    fn fully_unparseable_entry_counts_as_closed() {
        let hours = monday_hours("ask at the bar");
        assert!(!hours.is_open_at(&at(3, 18, 0)));
    }

    #[rstest]
    fn midnight_close_means_end_of_day() {
        let hours = monday_hours("20:00-00:00");
        assert!(hours.is_open_at(&at(3, 23, 59)));
        assert!(!hours.is_open_at(&at(3, 0, 30)));
    }

    #[rstest]
    #[case("10:99-12:00")]
    #[case("25:00-26:00")]
    fn out_of_range_fields_are_skipped(#[case] entry: &str) {
        assert!(parse_day_entry(entry).is_empty());
    }

    #[rstest]
    fn en_dash_separator_is_accepted() {
        let ranges = parse_day_entry("9:00\u{2013}17:00");
        assert_eq!(
            ranges,
            vec![TimeRange {
                open: 540,
                close: 1020
            }]
        );
    }

    #[rstest]
    fn range_boundaries_are_inclusive() {
        let hours = monday_hours("9:00-17:00");
        assert!(hours.is_open_at(&at(3, 9, 0)));
        assert!(hours.is_open_at(&at(3, 17, 0)));
        assert!(!hours.is_open_at(&at(3, 17, 1)));
    }

    #[rstest]
    fn pm_marker_shifts_the_whole_candidate() {
        // "11:00am-2:00pm" contains "pm", so the 11:00 open is shifted to
        // 23:00 as well; the range then wraps. Long-standing quirk of the
        // per-candidate disambiguation.
        let ranges = parse_day_entry("11:00am-2:00pm");
        assert_eq!(
            ranges,
            vec![TimeRange {
                open: 1380,
                close: 840
            }]
        );
    }

    #[rstest]
    fn twelve_thirty_am_is_read_as_afternoon() {
        // Known limitation: a lone "am" marker is never folded down, so
        // "12:30am" parses as 12:30 in the afternoon.
        let ranges = parse_day_entry("12:30am-6:00am");
        assert_eq!(
            ranges,
            vec![TimeRange {
                open: 750,
                close: 360
            }]
        );
    }

    #[rstest]
    fn parse_extracts_ranges_from_surrounding_text() {
        let ranges = parse_day_entry("open 10:00-16:00 (kitchen from 12)");
        assert_eq!(
            ranges,
            vec![TimeRange {
                open: 600,
                close: 960
            }]
        );
    }
}
