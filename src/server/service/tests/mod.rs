use chrono::NaiveDateTime;
use eventhub_test_utils::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::server::{
    error::{sync::SyncError, Error},
    model::canonical::{CanonicalDateRecord, CanonicalEventRecord, CanonicalZoneRecord},
};

mod provider;

fn datetime(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").expect("valid test datetime")
}

/// The record reconciled from the single-event concert payload.
fn concert_record() -> CanonicalEventRecord {
    CanonicalEventRecord {
        provider_event_id: "291".to_string(),
        title: "Concert".to_string(),
        active: true,
        dates: vec![CanonicalDateRecord {
            provider_date_id: "291".to_string(),
            date: datetime("2019-06-30 00:00:00"),
            sale_start_date: None,
            sale_end_date: None,
            zones: vec![CanonicalZoneRecord {
                provider_zone_id: "40".to_string(),
                name: "Platea".to_string(),
                capacity: 0,
                price_cents: 2000,
                numbered: true,
                remaining: None,
            }],
        }],
    }
}

/// Row counts of the event, event_date and zone tables.
async fn row_counts(db: &sea_orm::DatabaseConnection) -> Result<(u64, u64, u64), TestError> {
    Ok((
        entity::prelude::Event::find().count(db).await?,
        entity::prelude::EventDate::find().count(db).await?,
        entity::prelude::Zone::find().count(db).await?,
    ))
}
