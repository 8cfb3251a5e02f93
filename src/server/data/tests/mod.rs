use chrono::{NaiveDate, NaiveDateTime};
use eventhub_test_utils::prelude::*;

use crate::server::{
    data::{
        event::EventRepository, event_date::EventDateRepository, provider::ProviderRepository,
        provider_resource::ProviderResourceRepository, zone::ZoneRepository,
    },
    model::canonical::{CanonicalDateRecord, CanonicalEventRecord, CanonicalZoneRecord},
};


fn datetime(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").expect("valid test datetime")
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
}

fn event_record(provider_event_id: &str, title: &str) -> CanonicalEventRecord {
    CanonicalEventRecord {
        provider_event_id: provider_event_id.to_string(),
        title: title.to_string(),
        active: true,
        dates: Vec::new(),
    }
}

fn date_record(provider_date_id: &str, date: &str) -> CanonicalDateRecord {
    CanonicalDateRecord {
        provider_date_id: provider_date_id.to_string(),
        date: datetime(date),
        sale_start_date: None,
        sale_end_date: None,
        zones: Vec::new(),
    }
}

fn zone_record(provider_zone_id: &str, capacity: i32, remaining: Option<i32>) -> CanonicalZoneRecord {
    CanonicalZoneRecord {
        provider_zone_id: provider_zone_id.to_string(),
        name: format!("Zone {}", provider_zone_id),
        capacity,
        price_cents: 2000,
        numbered: false,
        remaining,
    }
}
