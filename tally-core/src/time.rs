//! Time utilities: timezone-aware "now" and lenient timestamp parsing.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Timezone used when the config does not name one.
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse an IANA timezone name like "Asia/Kolkata".
pub fn parse_timezone(tz: &str) -> Result<Tz> {
    tz.trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("invalid timezone: {tz}"))
}

/// Wall-clock time in `tz` for a UTC instant.
pub fn to_local(utc: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    utc.with_timezone(&tz).naive_local()
}

/// Current wall-clock time in `tz`.
pub fn local_now(tz: Tz) -> NaiveDateTime {
    to_local(Utc::now(), tz)
}

/// Parse a stored or user-entered timestamp.
///
/// Returns `None` for anything unrecognised instead of failing; callers
/// treat that as the null marker.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(ts);
        }
    }

    // Offsets are dropped: the log stores wall-clock time.
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Format a timestamp for storage and display.
///
/// Sub-second digits are written only when present, so
/// `parse_timestamp(&format_timestamp(ts)) == Some(ts)`.
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    if ts.nanosecond() == 0 {
        ts.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        ts.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }
}
