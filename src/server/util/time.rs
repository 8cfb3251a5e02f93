//! Timestamp parsing for provider payloads and listing filters.
//!
//! Provider resources are inconsistent about timestamp formats. Every timestamp is stored as a
//! naive UTC datetime; values carrying an offset are converted to UTC first.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-only format used by providers and by the listing filters.
pub static DATE_FORMAT: &str = "%Y-%m-%d";

static DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses a provider timestamp into a naive UTC datetime.
///
/// Accepted formats, tried in order:
/// - RFC 3339 with an offset (`2019-06-30T20:00:00+02:00`), converted to UTC
/// - `YYYY-MM-DDTHH:MM:SS` and `YYYY-MM-DD HH:MM:SS`, optionally with fractional seconds,
///   taken as UTC
/// - `YYYY-MM-DD`, taken as midnight UTC
///
/// # Returns
/// - `Some(NaiveDateTime)` - The value matched one of the accepted formats
/// - `None` - The value is not a recognized timestamp
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.naive_utc());
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime);
        }
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parses an optional `YYYY-MM-DD` listing filter.
///
/// Absent, empty, and malformed filters all yield `None` so the filter is ignored rather than
/// rejected.
pub fn parse_date_filter(value: Option<&str>) -> Option<NaiveDate> {
    let value = value?.trim();

    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            if !value.is_empty() {
                tracing::debug!("Ignoring malformed date filter {:?}", value);
            }
            None
        }
    }
}
