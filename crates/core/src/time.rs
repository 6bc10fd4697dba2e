//! Instant parsing for source-supplied timestamps.
//!
//! Timestamps arrive as strings in whatever shape the lot source stored them.
//! They are always converted to `DateTime<Utc>` before any comparison; comparing
//! the raw strings orders `2024-1-9` after `2024-01-10`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::{DomainError, DomainResult};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a timestamp into a UTC instant.
///
/// Accepted shapes, tried in order:
/// - RFC 3339 (`2024-03-01T10:00:00.000Z`, `2024-03-01T10:00:00+02:00`)
/// - naive date-time, interpreted as UTC (`2024-03-01 10:00:00`)
/// - bare date, interpreted as midnight UTC (`2024-03-01`)
pub fn parse_instant(field: &'static str, raw: &str) -> DomainResult<DateTime<Utc>> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }

    Err(DomainError::invalid_timestamp(field, raw))
}
