//! Event listing endpoint.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::{
    error::Error,
    model::{
        api::{ErrorDto, EventSummary},
        app::AppState,
    },
    service::event::EventService,
};

/// OpenAPI tag for event routes
pub static EVENT_TAG: &str = "event";

/// Sale window filters for the event listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventListParams {
    /// Only dates whose sale starts on or after this day (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// Only dates whose sale ends on or before this day (`YYYY-MM-DD`)
    pub end_date: Option<String>,
}

/// List active events
///
/// Returns every active event with at least one active date whose sale window matches the
/// filters, in the order events were first ingested. Malformed filters are ignored.
///
/// # Responses
/// - 200 (Success): JSON array of events, possibly empty
/// - 500 (Internal Server Error): Database error while listing events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = EVENT_TAG,
    params(EventListParams),
    responses(
        (status = 200, description = "Success when listing active events", body = Vec<EventSummary>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<EventListParams>,
) -> Result<impl IntoResponse, Error> {
    let events = EventService::new(&state.db)
        .list_active_events(params.start_date.as_deref(), params.end_date.as_deref())
        .await?;

    Ok((StatusCode::OK, Json(events)))
}
