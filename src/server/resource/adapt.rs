//! Maps a parsed provider resource into canonical records.
//!
//! Providers disagree on field names and value types, and XML resources wrap collections in
//! extra elements. The adapter absorbs both so the reconciler only sees
//! [`CanonicalEventRecord`]s. Any missing required field or badly shaped value fails the whole
//! resource with [`SyncError::MalformedResource`], naming the offending path.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::server::{
    error::sync::SyncError,
    model::canonical::{CanonicalDateRecord, CanonicalEventRecord, CanonicalZoneRecord},
    util::time::parse_timestamp,
};

/// Keys under which an event's dates may appear.
static DATE_KEYS: [&str; 2] = ["dates", "event"];
/// Keys under which a date's zones may appear.
static ZONE_KEYS: [&str; 2] = ["zones", "zone"];
static SALE_START_KEYS: [&str; 2] = ["sale_start_date", "sell_start_date"];
static SALE_END_KEYS: [&str; 2] = ["sale_end_date", "sell_end_date"];

/// How to find one level of the catalog hierarchy inside a tree.
struct Collection {
    /// Field whose presence marks a mapping as a single record.
    marker: &'static str,
    /// Keys that wrap the collection itself.
    wrappers: &'static [&'static str],
}

static EVENTS: Collection = Collection {
    marker: "provider_event_id",
    wrappers: &["events", "event"],
};
static DATES: Collection = Collection {
    marker: "provider_date_id",
    wrappers: &["dates", "date", "event"],
};
static ZONES: Collection = Collection {
    marker: "provider_zone_id",
    wrappers: &["zones", "zone"],
};

/// Adapts a parsed resource tree into canonical event records, preserving input order.
pub fn adapt(tree: &Value) -> Result<Vec<CanonicalEventRecord>, SyncError> {
    locate(tree, &EVENTS, "events")?
        .into_iter()
        .enumerate()
        .map(|(index, event)| adapt_event(event, &format!("events[{}]", index)))
        .collect()
}

/// Finds the records of a collection, unwrapping wrapper elements.
fn locate<'a>(
    value: &'a Value,
    collection: &Collection,
    path: &str,
) -> Result<Vec<&'a Value>, SyncError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.trim().is_empty() => Ok(Vec::new()),
        Value::Array(items) => Ok(items.iter().collect()),
        Value::Object(map) => {
            if map.is_empty() {
                return Ok(Vec::new());
            }
            if map.contains_key(collection.marker) {
                return Ok(vec![value]);
            }
            if let Some(inner) = collection
                .wrappers
                .iter()
                .filter_map(|key| map.get(*key))
                .find(|inner| is_container(inner))
            {
                return locate(inner, collection, path);
            }
            if map.len() == 1 {
                if let Some(inner) = map.values().next().filter(|inner| is_container(inner)) {
                    return locate(inner, collection, path);
                }
            }
            // A mapping without its marker is a record missing its identifier.
            Ok(vec![value])
        }
        _ => Err(malformed(path, "expected a collection")),
    }
}

fn is_container(value: &Value) -> bool {
    value.is_object() || value.is_array() || value.is_null()
}

fn adapt_event(value: &Value, path: &str) -> Result<CanonicalEventRecord, SyncError> {
    let record = as_record(value, path)?;

    let dates = match first_of(record, &DATE_KEYS) {
        Some(dates) => locate(dates, &DATES, &format!("{}.dates", path))?
            .into_iter()
            .enumerate()
            .map(|(index, date)| adapt_date(date, &format!("{}.dates[{}]", path, index)))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(CanonicalEventRecord {
        provider_event_id: required_id(record, "provider_event_id", path)?,
        title: required_text(record, "title", path)?,
        active: optional_bool(record, "active", path)?.unwrap_or(true),
        dates,
    })
}

fn adapt_date(value: &Value, path: &str) -> Result<CanonicalDateRecord, SyncError> {
    let record = as_record(value, path)?;

    let provider_date_id = required_id(record, "provider_date_id", path)?;
    let date = optional_timestamp(record, &["date"], path)?
        .ok_or_else(|| malformed(&field_path(path, "date"), "missing required field"))?;

    let zones = match first_of(record, &ZONE_KEYS) {
        Some(zones) => locate(zones, &ZONES, &format!("{}.zones", path))?
            .into_iter()
            .enumerate()
            .map(|(index, zone)| adapt_zone(zone, &format!("{}.zones[{}]", path, index)))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(CanonicalDateRecord {
        provider_date_id,
        date,
        sale_start_date: optional_timestamp(record, &SALE_START_KEYS, path)?,
        sale_end_date: optional_timestamp(record, &SALE_END_KEYS, path)?,
        zones,
    })
}

fn adapt_zone(value: &Value, path: &str) -> Result<CanonicalZoneRecord, SyncError> {
    let record = as_record(value, path)?;

    let capacity = optional_count(record, "capacity", path)?.unwrap_or(0);

    // Stated remaining count wins over a sold count, which wins over a sold-out flag.
    let remaining = if let Some(rest) = optional_count(record, "rest", path)? {
        Some(rest)
    } else if let Some(sold) = optional_count(record, "sold", path)? {
        Some(capacity.saturating_sub(sold).max(0))
    } else {
        match optional_bool(record, "sold_out", path)? {
            Some(true) => Some(0),
            _ => None,
        }
    };

    Ok(CanonicalZoneRecord {
        provider_zone_id: required_id(record, "provider_zone_id", path)?,
        name: required_text(record, "name", path)?,
        capacity,
        price_cents: optional_price(record, "price", path)?.unwrap_or(0),
        numbered: optional_bool(record, "numbered", path)?.unwrap_or(false),
        remaining,
    })
}

fn malformed(path: &str, reason: &str) -> SyncError {
    SyncError::MalformedResource(format!("{}: {}", path, reason))
}

fn field_path(path: &str, key: &str) -> String {
    format!("{}.{}", path, key)
}

fn as_record<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, SyncError> {
    value
        .as_object()
        .ok_or_else(|| malformed(path, "expected a mapping"))
}

/// Value of the first key present and not null.
fn first_of<'a>(record: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|value| !value.is_null())
}

fn required_id(record: &Map<String, Value>, key: &str, path: &str) -> Result<String, SyncError> {
    let id = match record.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => n.to_string(),
        None | Some(Value::Null) => String::new(),
        Some(_) => {
            return Err(malformed(
                &field_path(path, key),
                "expected a string or integer identifier",
            ))
        }
    };

    if id.is_empty() {
        return Err(malformed(&field_path(path, key), "missing required field"));
    }

    Ok(id)
}

fn required_text(record: &Map<String, Value>, key: &str, path: &str) -> Result<String, SyncError> {
    match record.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        None | Some(Value::Null) => Err(malformed(&field_path(path, key), "missing required field")),
        Some(_) => Err(malformed(&field_path(path, key), "expected text")),
    }
}

fn optional_bool(
    record: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<bool>, SyncError> {
    let value = match record.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| malformed(&field_path(path, key), "expected a boolean"))
}

/// Non-negative integer count, such as capacity or tickets remaining.
fn optional_count(
    record: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<i32>, SyncError> {
    let parsed = match record.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    parsed
        .filter(|n| *n >= 0)
        .and_then(|n| i32::try_from(n).ok())
        .map(Some)
        .ok_or_else(|| malformed(&field_path(path, key), "expected a non-negative integer"))
}

fn optional_price(
    record: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<i64>, SyncError> {
    let parsed = match record.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(whole) => whole.checked_mul(100),
            None => n.as_f64().and_then(float_cents),
        },
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => parse_cents(s.trim()),
        Some(_) => None,
    };

    parsed
        .filter(|cents| *cents >= 0)
        .map(Some)
        .ok_or_else(|| malformed(&field_path(path, key), "expected a price with at most two decimals"))
}

/// Converts a fractional JSON number into cents.
///
/// `None` for non-finite values, more than two decimals, or amounts outside `i64` cents.
fn float_cents(value: f64) -> Option<i64> {
    let cents = value * 100.0;
    if !cents.is_finite() || (cents - cents.round()).abs() > 1e-6 {
        return None;
    }

    let cents = cents.round();
    if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
        return None;
    }

    Some(cents as i64)
}

/// Parses a decimal string such as `20`, `20.5` or `20.05` into cents.
fn parse_cents(value: &str) -> Option<i64> {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };

    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits(whole) || fraction.len() > 2 || !digits(fraction) {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse().ok()?,
    };

    whole.checked_mul(100)?.checked_add(fraction)
}

fn optional_timestamp(
    record: &Map<String, Value>,
    keys: &[&str],
    path: &str,
) -> Result<Option<NaiveDateTime>, SyncError> {
    let Some((key, value)) = keys
        .iter()
        .find_map(|key| record.get(*key).map(|value| (*key, value)))
    else {
        return Ok(None);
    };

    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_timestamp(s)
            .map(Some)
            .ok_or_else(|| malformed(&field_path(path, key), "expected a timestamp")),
        _ => Err(malformed(&field_path(path, key), "expected a timestamp")),
    }
}
