//! Timestamp parsing and storage formatting
//!
//! SQLite has no native timestamp type, so every timestamp is stored as
//! fixed-width UTC text. Comparisons in SQL are then plain string
//! comparisons that agree with chronological order.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Naive date-time layouts accepted in addition to RFC 3339
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Years that fit the fixed four-digit storage format
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Parse a caller-supplied ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, naive date-times (taken as UTC) and
/// bare dates (taken as midnight UTC). Returns `None` when nothing matches
/// or when the UTC year falls outside 0..=9999.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    parse_any(input).filter(|ts| STORABLE_YEARS.contains(&ts.year()))
}

fn parse_any(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc))
}

/// Format a timestamp for storage and for bound comparison values
pub fn to_db_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a timestamp previously written by [`to_db_timestamp`]
pub fn from_db_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
