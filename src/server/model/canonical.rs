//! Canonical, provider-independent catalog records.
//!
//! Produced by the resource adapter from a parsed provider resource and consumed by the
//! reconciler. Collections keep the order in which they appeared in the resource.

use chrono::NaiveDateTime;

/// An event as reported by a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEventRecord {
    /// Provider-assigned identifier, stringified when the provider sends a number.
    pub provider_event_id: String,
    /// Event title.
    pub title: String,
    /// Whether the provider lists the event; defaults to `true`.
    pub active: bool,
    /// Dates of the event.
    pub dates: Vec<CanonicalDateRecord>,
}

/// A single occurrence of an event.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalDateRecord {
    /// Provider-assigned identifier, unique within the event.
    pub provider_date_id: String,
    /// When the event takes place, in UTC.
    pub date: NaiveDateTime,
    /// Start of ticket sales, in UTC.
    pub sale_start_date: Option<NaiveDateTime>,
    /// End of ticket sales, in UTC.
    pub sale_end_date: Option<NaiveDateTime>,
    /// Zones of the date.
    pub zones: Vec<CanonicalZoneRecord>,
}

/// A seating or pricing zone of an event date.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalZoneRecord {
    /// Provider-assigned identifier, unique within the date.
    pub provider_zone_id: String,
    /// Zone name.
    pub name: String,
    /// Total number of tickets.
    pub capacity: i32,
    /// Price in cents.
    pub price_cents: i64,
    /// Whether seats are numbered.
    pub numbered: bool,
    /// Remaining tickets, when the provider states it.
    pub remaining: Option<i32>,
}
