use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDateTime;
use eventhub::server::{
    controller::event::{list_events, EventListParams},
    model::{api::EventSummary, app::AppState},
};
use eventhub_test_utils::prelude::*;

mod event;
mod router;

fn datetime(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").expect("valid test datetime")
}

/// Inserts an active event with one date on sale from 2014-07-01 to 2019-06-30.
async fn insert_on_sale_event(
    test: &TestContext,
    provider_event_id: &str,
    title: &str,
) -> Result<entity::event::Model, TestError> {
    let catalog = test.catalog();
    let event = catalog
        .insert_event(Some(test.providers[0].id), provider_event_id, title, true)
        .await?;
    catalog
        .insert_event_date(
            event.id,
            "1",
            datetime("2019-06-30 21:00:00"),
            Some(datetime("2014-07-01 00:00:00")),
            Some(datetime("2019-06-30 20:00:00")),
        )
        .await?;

    Ok(event)
}

async fn body_json(response: axum::response::Response) -> Vec<EventSummary> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    serde_json::from_slice(&bytes).expect("body should be a JSON event list")
}
