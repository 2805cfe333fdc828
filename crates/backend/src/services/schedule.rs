//! Calendar-day scoping and timestamp normalization.
//!
//! All "what day is it" questions are answered in a fixed UTC+7 offset, the
//! same offset used when normalizing bare dates on input. Bare dates get a
//! default time-of-day appended (09:00 for range starts, 17:00 for range
//! ends) so that a date entered as `2024-06-01` reads back with the same
//! date component.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use thiserror::Error;

/// Application calendar offset (UTC+7).
pub const APP_OFFSET: FixedOffset = match FixedOffset::east_opt(7 * 3600) {
    Some(offset) => offset,
    None => panic!("invalid fixed offset"),
};

const DEFAULT_START_TIME: (u32, u32) = (9, 0);
const DEFAULT_END_TIME: (u32, u32) = (17, 0);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid time `{0}`, expected HH:MM")]
    InvalidTime(String),

    #[error("invalid timestamp `{0}`")]
    InvalidTimestamp(String),
}

/// Which end of a date range a bare date belongs to; picks the default
/// time-of-day appended during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    Start,
    End,
}

impl RangeBound {
    fn default_time(self) -> NaiveTime {
        let (h, m) = match self {
            RangeBound::Start => DEFAULT_START_TIME,
            RangeBound::End => DEFAULT_END_TIME,
        };
        NaiveTime::from_hms_opt(h, m, 0).expect("static time-of-day")
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ScheduleError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ScheduleError::InvalidDate(raw.to_string()))
}

/// Today's calendar date in the application offset.
pub fn today() -> NaiveDate {
    Utc::now().with_timezone(&APP_OFFSET).date_naive()
}

/// Resolve an optional `?date=` query parameter: absent means today,
/// malformed fails fast.
pub fn resolve_day(raw: Option<&str>) -> Result<NaiveDate, ScheduleError> {
    match raw {
        Some(s) if !s.trim().is_empty() => parse_date(s),
        _ => Ok(today()),
    }
}

/// Normalize a timestamp string from a request body. Full timestamps
/// (anything containing `T`) are parsed as RFC 3339; bare dates get the
/// bound's default time-of-day in the application offset.
pub fn normalize_timestamp(raw: &str, bound: RangeBound) -> Result<DateTime<Utc>, ScheduleError> {
    let raw = raw.trim();
    if raw.contains('T') {
        return DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ScheduleError::InvalidTimestamp(raw.to_string()));
    }

    let date = parse_date(raw)?;
    local_datetime(date, bound.default_time())
}

/// Anchor a bare `HH:MM` time to today's date in the application offset.
/// Full timestamps pass through unchanged.
pub fn anchor_time_today(raw: &str) -> Result<DateTime<Utc>, ScheduleError> {
    let raw = raw.trim();
    if raw.contains('T') {
        return DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ScheduleError::InvalidTimestamp(raw.to_string()));
    }

    let time = parse_time(raw)?;
    local_datetime(today(), time)
}

/// Combine a `YYYY-MM-DD` date with an `HH:MM` time in the application
/// offset.
pub fn combine_date_time(date: &str, time: &str) -> Result<DateTime<Utc>, ScheduleError> {
    let date = parse_date(date)?;
    let time = parse_time(time)?;
    local_datetime(date, time)
}

fn parse_time(raw: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .map_err(|_| ScheduleError::InvalidTime(raw.to_string()))
}

fn local_datetime(date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, ScheduleError> {
    APP_OFFSET
        .from_local_datetime(&date.and_time(time))
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| ScheduleError::InvalidDate(date.to_string()))
}

/// Half-open UTC interval `[start, end)` covering one calendar day in the
/// application offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

pub fn day_window(day: NaiveDate) -> DayWindow {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).expect("static midnight");
    let start = APP_OFFSET
        .from_local_datetime(&day.and_time(midnight))
        .single()
        .expect("fixed offsets have no DST gaps")
        .with_timezone(&Utc);
    DayWindow {
        start,
        end: start + Duration::days(1),
    }
}

/// The canonical day-inclusion rule for scheduled items: the item starts on
/// the day, ends on the day, or spans across it as a multi-day interval.
/// Items with no start are always due, so they match every day.
pub fn matches_day(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    window: &DayWindow,
) -> bool {
    let starts_on_day = start.is_some_and(|s| s >= window.start && s < window.end);
    let ends_on_day = end.is_some_and(|e| e >= window.start && e < window.end);
    let spans_day = match (start, end) {
        (Some(s), Some(e)) => s <= window.start && e >= window.end,
        _ => false,
    };
    start.is_none() || starts_on_day || ends_on_day || spans_day
}

/// Sort key for task listings; exactly one is applied as the single
/// ORDER BY key. Tie order is not a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskSort {
    #[default]
    Start,
    End,
    Tag,
    Done,
    Title,
}

impl TaskSort {
    /// Unrecognized values fall back to the default start-time ordering.
    pub fn parse(raw: Option<&str>) -> TaskSort {
        match raw {
            Some("end") => TaskSort::End,
            Some("tag") => TaskSort::Tag,
            Some("done") => TaskSort::Done,
            Some("title") => TaskSort::Title,
            _ => TaskSort::Start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn bare_start_date_gets_default_morning_time() {
        let ts = normalize_timestamp("2024-06-01", RangeBound::Start).unwrap();
        assert_eq!(ts, utc("2024-06-01T09:00:00+07:00"));
    }

    #[test]
    fn bare_end_date_gets_default_evening_time() {
        let ts = normalize_timestamp("2024-06-01", RangeBound::End).unwrap();
        assert_eq!(ts, utc("2024-06-01T17:00:00+07:00"));
    }

    #[test]
    fn bare_date_round_trips_its_date_component() {
        let ts = normalize_timestamp("2024-06-01", RangeBound::Start).unwrap();
        let local = ts.with_timezone(&APP_OFFSET);
        assert_eq!(local.date_naive().to_string(), "2024-06-01");
    }

    #[test]
    fn full_timestamps_pass_through() {
        let ts = normalize_timestamp("2024-06-01T12:30:00+07:00", RangeBound::End).unwrap();
        assert_eq!(ts, utc("2024-06-01T12:30:00+07:00"));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        for bad in ["2024-6-1", "junk", "2024-13-40", "01-06-2024", ""] {
            assert!(normalize_timestamp(bad, RangeBound::Start).is_err(), "{bad}");
        }
    }

    #[test]
    fn resolve_day_defaults_to_today() {
        assert_eq!(resolve_day(None).unwrap(), today());
        assert_eq!(resolve_day(Some("")).unwrap(), today());
        assert_eq!(
            resolve_day(Some("2024-06-01")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
        assert!(resolve_day(Some("not-a-date")).is_err());
    }

    #[test]
    fn day_window_covers_one_local_day() {
        let w = day_window(NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(w.start, utc("2024-06-02T00:00:00+07:00"));
        assert_eq!(w.end, utc("2024-06-03T00:00:00+07:00"));
    }

    #[test]
    fn multi_day_task_appears_on_every_covered_day() {
        let start = Some(utc("2024-06-01T09:00:00+07:00"));
        let end = Some(utc("2024-06-03T17:00:00+07:00"));

        for day in ["2024-06-01", "2024-06-02", "2024-06-03"] {
            let w = day_window(parse_date(day).unwrap());
            assert!(matches_day(start, end, &w), "expected match on {day}");
        }

        let before = day_window(parse_date("2024-05-31").unwrap());
        let after = day_window(parse_date("2024-06-04").unwrap());
        assert!(!matches_day(start, end, &before));
        assert!(!matches_day(start, end, &after));
    }

    #[test]
    fn unscheduled_tasks_match_every_day() {
        let w = day_window(parse_date("2024-06-02").unwrap());
        assert!(matches_day(None, None, &w));
        assert!(matches_day(None, Some(utc("2020-01-01T00:00:00Z")), &w));
    }

    #[test]
    fn single_day_task_matches_only_its_day() {
        let start = Some(utc("2024-06-02T10:00:00+07:00"));
        let end = Some(utc("2024-06-02T11:00:00+07:00"));
        assert!(matches_day(
            start,
            end,
            &day_window(parse_date("2024-06-02").unwrap())
        ));
        assert!(!matches_day(
            start,
            end,
            &day_window(parse_date("2024-06-03").unwrap())
        ));
    }

    #[test]
    fn anchor_time_lands_on_today() {
        let ts = anchor_time_today("08:15").unwrap();
        assert_eq!(ts.with_timezone(&APP_OFFSET).date_naive(), today());
        assert!(anchor_time_today("25:00").is_err());
    }

    #[test]
    fn combine_date_time_uses_app_offset() {
        let ts = combine_date_time("2024-06-01", "08:30").unwrap();
        assert_eq!(ts, utc("2024-06-01T08:30:00+07:00"));
    }

    #[test]
    fn sort_parse_falls_back_to_start() {
        assert_eq!(TaskSort::parse(None), TaskSort::Start);
        assert_eq!(TaskSort::parse(Some("bogus")), TaskSort::Start);
        assert_eq!(TaskSort::parse(Some("end")), TaskSort::End);
        assert_eq!(TaskSort::parse(Some("tag")), TaskSort::Tag);
        assert_eq!(TaskSort::parse(Some("done")), TaskSort::Done);
        assert_eq!(TaskSort::parse(Some("title")), TaskSort::Title);
    }
}
