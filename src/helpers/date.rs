//! Date helper functions

use chrono::{NaiveDate, NaiveDateTime};

/// Parse a publication date in the formats posts and manifests use
///
/// # Examples
/// ```ignore
/// parse_date("2024-01-15")          // -> 2024-01-15 00:00:00
/// parse_date("2024/01/15 10:30:00") // -> 2024-01-15 10:30:00
/// ```
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.naive_utc())
}

/// Format a date the way the manifest stores it
pub fn manifest_date(date: &NaiveDateTime) -> String {
    date.format("%Y-%m-%d").to_string()
}
