//! Date normalization for server-provided timestamps.
//!
//! Accepted inputs: ISO-8601 strings (with offset, without offset, or a bare
//! date), epoch milliseconds, epoch seconds, and numeric strings. Values
//! below `1e12` are taken as seconds. Anything unparseable is echoed back
//! as-is so a display cell never ends up empty or panics.
//!
//! All output is rendered in India Standard Time, the platform's home zone.

#[cfg(test)]
#[path = "date_test.rs"]
mod date_test;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// UTC+05:30.
pub const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Epoch values below this are seconds, at or above it milliseconds.
const SECONDS_CUTOFF: f64 = 1e12;

const DATE_TIME_FORMAT: &str = "%d/%m/%Y, %I:%M:%S %P";
const DATE_FORMAT: &str = "%d/%m/%Y";
const CLOCK_FORMAT: &str = "%I:%M:%S %P";

/// Placeholder for a missing value.
pub const MISSING: &str = "-";

fn ist() -> Option<FixedOffset> {
    FixedOffset::east_opt(IST_OFFSET_SECS)
}

fn from_epoch(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    let ms = if n < SECONDS_CUTOFF { n * 1000.0 } else { n };
    #[allow(clippy::cast_possible_truncation)]
    let ms = ms.round() as i64;
    Utc.timestamp_millis_opt(ms).single()
}

fn parse_text(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(n) = raw.parse::<f64>() {
        return from_epoch(n);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            // Offset-less date-times are wall-clock times in the home zone.
            return ist()?.from_local_datetime(&naive).single().map(|dt| dt.with_timezone(&Utc));
        }
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
    }
    None
}

/// Parse any accepted date-like value into a UTC instant.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_epoch),
        Value::String(s) => parse_text(s),
        _ => None,
    }
}

/// Epoch milliseconds for sorting; missing or unparseable values sort as 0.
pub fn sort_key(value: Option<&Value>) -> i64 {
    value.and_then(parse_instant).map_or(0, |dt| dt.timestamp_millis())
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn raw_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render(value: Option<&Value>, fmt: &str) -> String {
    let Some(value) = value.filter(|v| !is_missing(v)) else {
        return MISSING.to_owned();
    };
    match (parse_instant(value), ist()) {
        (Some(dt), Some(zone)) => dt.with_timezone(&zone).format(fmt).to_string(),
        _ => raw_text(value),
    }
}

/// Human-readable date and time, or the original text when unparseable.
pub fn normalize_date(value: Option<&Value>) -> String {
    render(value, DATE_TIME_FORMAT)
}

/// Human-readable calendar day, or the original text when unparseable.
pub fn normalize_day(value: Option<&Value>) -> String {
    render(value, DATE_FORMAT)
}

/// Wall-clock time in India Standard Time for the live navbar clock.
pub fn format_ist_clock(now: DateTime<Utc>) -> String {
    match ist() {
        Some(zone) => now.with_timezone(&zone).format(CLOCK_FORMAT).to_string(),
        None => now.format(CLOCK_FORMAT).to_string(),
    }
}
