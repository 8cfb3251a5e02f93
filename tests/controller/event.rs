//! Tests for the list_events endpoint.

use super::*;

/// Tests listing without filters.
///
/// Expected: 200 OK with every active event in creation order
#[tokio::test]
async fn lists_active_events() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .build()
        .await?;
    let concert = insert_on_sale_event(&test, "291", "Concert").await?;
    tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;
    let theater = insert_on_sale_event(&test, "322", "Theater").await?;

    let result = list_events(
        State(test.to_app_state::<AppState>()),
        Query(EventListParams::default()),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        vec![
            EventSummary {
                uuid: concert.uuid,
                title: "Concert".to_string()
            },
            EventSummary {
                uuid: theater.uuid,
                title: "Theater".to_string()
            },
        ]
    );

    Ok(())
}

/// Tests a start date after every sale start.
///
/// Expected: 200 OK with an empty list
#[tokio::test]
async fn empty_list_for_late_start_date() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .build()
        .await?;
    insert_on_sale_event(&test, "291", "Concert").await?;

    let params = EventListParams {
        start_date: Some("2020-01-01".to_string()),
        end_date: None,
    };
    let result = list_events(State(test.to_app_state::<AppState>()), Query(params)).await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await.is_empty());

    Ok(())
}

/// Tests a listing when the database is missing its tables.
///
/// Expected: 500 Internal Server Error
#[tokio::test]
async fn error_when_tables_missing() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let result = list_events(
        State(test.to_app_state::<AppState>()),
        Query(EventListParams::default()),
    )
    .await;

    assert!(result.is_err());
    let resp = result.err().unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    Ok(())
}
