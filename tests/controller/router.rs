//! Tests for the application router.

use axum::{body::Body, http::Request};
use eventhub::server::router::routes;
use tower::ServiceExt;

use super::*;

/// Tests the listing through the router with query string filters.
///
/// Verifies a malformed filter is ignored rather than rejected.
///
/// Expected: 200 OK with the on-sale event
#[tokio::test]
async fn routes_event_listing() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .build()
        .await?;
    let event = insert_on_sale_event(&test, "291", "Concert").await?;

    let app = routes().with_state(test.to_app_state::<AppState>());
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/events?start_date=2014-07-01&end_date=not-a-date")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let events = body_json(resp).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].uuid, event.uuid);

    Ok(())
}

/// Tests that the OpenAPI document lists the event endpoint.
///
/// Expected: 200 OK with `/api/events` in the document
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let app = routes().with_state(test.to_app_state::<AppState>());
    let resp = app
        .oneshot(
            Request::builder()
                .uri("/api/docs/openapi.json")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let document: serde_json::Value =
        serde_json::from_slice(&bytes).expect("document should be JSON");
    assert!(document["paths"].get("/api/events").is_some());

    Ok(())
}
