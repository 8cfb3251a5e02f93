//! Tests for ProviderSyncOrchestrator::sync_provider.
//!
//! Each test serves a provider resource from the mock server and checks what the sync
//! reports and what it leaves in the catalog tables.

use super::*;

/// Tests syncing a provider serving a single JSON event.
///
/// Expected: Ok with 1 event, 1 date and 1 zone created and the JSON format recorded
#[tokio::test]
async fn syncs_json_resource() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .with_resource_endpoint("/feed", 200, factory::concert_json(), 1)
        .build()
        .await?;
    let provider_id = test.providers[0].id;
    let state: AppState = test.to_app_state();

    let outcome = state
        .orchestrator
        .sync_provider(provider_id)
        .await
        .expect("sync should succeed");

    test.assert_mocks();
    assert_eq!(outcome.provider_id, provider_id);
    assert_eq!(outcome.format, ResourceFormat::Json);
    assert_eq!(outcome.reconciled.events_created, 1);
    assert_eq!(outcome.reconciled.dates_created, 1);
    assert_eq!(outcome.reconciled.zones_created, 1);
    assert_eq!(row_counts(&test).await?, (1, 1, 1));

    let resource = entity::prelude::ProviderResource::find()
        .one(&test.db)
        .await?
        .expect("resource should exist");
    assert_eq!(resource.format.as_deref(), Some("json"));
    assert!(resource.fetched_at.is_some());

    Ok(())
}

/// Tests syncing the same resource twice.
///
/// Verifies the second sync updates the rows written by the first, keeping their identity.
///
/// Expected: Ok with no rows created by the second sync and unchanged row counts
#[tokio::test]
async fn resync_is_idempotent() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .with_resource_endpoint("/feed", 200, factory::concert_json(), 2)
        .build()
        .await?;
    let provider_id = test.providers[0].id;
    let state: AppState = test.to_app_state();

    state
        .orchestrator
        .sync_provider(provider_id)
        .await
        .expect("first sync should succeed");
    let before = entity::prelude::Event::find()
        .one(&test.db)
        .await?
        .expect("event should exist");

    let outcome = state
        .orchestrator
        .sync_provider(provider_id)
        .await
        .expect("second sync should succeed");

    test.assert_mocks();
    assert_eq!(outcome.reconciled.created(), 0);
    assert_eq!(outcome.reconciled.updated(), 3);
    assert_eq!(row_counts(&test).await?, (1, 1, 1));

    let after = entity::prelude::Event::find()
        .one(&test.db)
        .await?
        .expect("event should exist");
    assert_eq!(after.uuid, before.uuid);
    assert_eq!(after.created_at, before.created_at);

    Ok(())
}

/// Tests syncing a catalog served as XML.
///
/// Verifies upstream field names are understood and that zone "40", sold out upstream, has
/// no tickets remaining while zone "38" starts at its capacity.
///
/// Expected: Ok with 2 events, 2 dates and 2 zones and the XML format recorded
#[tokio::test]
async fn syncs_xml_resource() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed.xml")
        .with_resource_endpoint("/feed.xml", 200, factory::catalog_xml(), 1)
        .build()
        .await?;
    let provider_id = test.providers[0].id;
    let state: AppState = test.to_app_state();

    let outcome = state
        .orchestrator
        .sync_provider(provider_id)
        .await
        .expect("sync should succeed");

    test.assert_mocks();
    assert_eq!(outcome.format, ResourceFormat::Xml);
    assert_eq!(row_counts(&test).await?, (2, 2, 2));

    let mut zones = entity::prelude::Zone::find()
        .all(&test.db)
        .await?
        .into_iter()
        .map(|z| (z.provider_zone_id, z.capacity, z.remaining, z.numbered))
        .collect::<Vec<_>>();
    zones.sort();
    assert_eq!(
        zones,
        vec![
            ("38".to_string(), 100, 100, false),
            ("40".to_string(), 243, 0, true),
        ]
    );

    let resource = entity::prelude::ProviderResource::find()
        .one(&test.db)
        .await?
        .expect("resource should exist");
    assert_eq!(resource.format.as_deref(), Some("xml"));

    Ok(())
}

/// Tests that the JSON and XML renditions of a catalog reconcile to the same rows.
///
/// Expected: Ok with equal outcomes for both providers
#[tokio::test]
async fn json_and_xml_catalogs_agree() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Json", "/feed.json")
        .with_provider("Xml", "/feed.xml")
        .with_resource_endpoint("/feed.json", 200, factory::catalog_json(), 1)
        .with_resource_endpoint("/feed.xml", 200, factory::catalog_xml(), 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let json = state
        .orchestrator
        .sync_provider(test.providers[0].id)
        .await
        .expect("json sync should succeed");
    let xml = state
        .orchestrator
        .sync_provider(test.providers[1].id)
        .await
        .expect("xml sync should succeed");

    test.assert_mocks();
    assert_eq!(json.reconciled, xml.reconciled);
    assert_eq!(row_counts(&test).await?, (4, 4, 4));

    Ok(())
}

/// Tests a provider endpoint answering 404.
///
/// Expected: Err with UpstreamUnavailable and no rows written
#[tokio::test]
async fn fails_for_unavailable_upstream() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .with_resource_endpoint("/feed", 404, "Not Found", 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = state.orchestrator.sync_provider(test.providers[0].id).await;

    test.assert_mocks();
    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::UpstreamUnavailable { .. }))
    ));
    assert_eq!(row_counts(&test).await?, (0, 0, 0));

    Ok(())
}

/// Tests that a failed sync of a single provider is logged with the provider's identity.
///
/// Expected: an error log line naming the provider, its id and the failure kind
#[tokio::test]
async fn logs_failure_with_provider_context() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Ticketing", "/feed")
        .with_resource_endpoint("/feed", 503, "Service Unavailable", 1)
        .build()
        .await?;
    let provider_id = test.providers[0].id;
    let state: AppState = test.to_app_state();

    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let result = state.orchestrator.sync_provider(provider_id).await;

    test.assert_mocks();
    assert!(result.is_err());

    let output = logs.contents();
    let line = output
        .lines()
        .find(|line| line.contains("Provider sync failed"))
        .unwrap_or_else(|| panic!("no failure log in {:?}", output));
    assert!(line.contains("ERROR"), "{}", line);
    assert!(line.contains(&format!("provider_id={}", provider_id)), "{}", line);
    assert!(line.contains("Ticketing"), "{}", line);
    assert!(line.contains("upstream_unavailable"), "{}", line);

    Ok(())
}

/// Tests a resource where a later event is missing its identifier.
///
/// Verifies nothing from the resource is written even though the first event is valid.
///
/// Expected: Err with MalformedResource naming the missing field, no rows written
#[tokio::test]
async fn fails_for_malformed_resource() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .with_resource_endpoint("/feed", 200, factory::malformed_json(), 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = state.orchestrator.sync_provider(test.providers[0].id).await;

    test.assert_mocks();
    let err = result.expect_err("sync should fail");
    assert_eq!(err.kind(), "malformed_resource");
    match err.as_sync_error() {
        Some(SyncError::MalformedResource(message)) => {
            assert!(message.contains("events[1].provider_event_id"), "{}", message);
        }
        other => panic!("expected MalformedResource, got {:?}", other),
    }
    assert_eq!(row_counts(&test).await?, (0, 0, 0));

    let resource = entity::prelude::ProviderResource::find()
        .one(&test.db)
        .await?
        .expect("resource should exist");
    assert!(resource.format.is_none());

    Ok(())
}

/// Tests a resource that is neither JSON nor XML.
///
/// Expected: Err with UnrecognizedFormat
#[tokio::test]
async fn fails_for_unrecognized_format() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .with_resource_endpoint("/feed", 200, "provider_event_id,title\n291,Concert\n", 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let result = state.orchestrator.sync_provider(test.providers[0].id).await;

    test.assert_mocks();
    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::UnrecognizedFormat))
    ));

    Ok(())
}

/// Tests syncing an unknown provider.
///
/// Expected: Err with ProviderNotFound
#[tokio::test]
async fn fails_for_unknown_provider() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ingestion_tables().build().await?;
    let state: AppState = test.to_app_state();

    let result = state.orchestrator.sync_provider(42).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::ProviderNotFound(42)))
    ));

    Ok(())
}

/// Tests syncing a provider without a configured resource.
///
/// Expected: Err with MissingResource
#[tokio::test]
async fn fails_without_resource() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ingestion_tables().build().await?;
    let provider = test
        .catalog()
        .insert_provider_without_resource("Bare")
        .await?;
    let state: AppState = test.to_app_state();

    let result = state.orchestrator.sync_provider(provider.id).await;

    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::MissingResource(id))) if id == provider.id
    ));

    Ok(())
}

/// Tests two syncs of the same provider started together.
///
/// Verifies the first sync holds the provider until it finishes so the second fails fast,
/// and that the provider can be synced again afterwards.
///
/// Expected: one Ok and one Err with SyncInProgress, then Ok
#[tokio::test]
async fn rejects_concurrent_sync_of_same_provider() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .with_resource_endpoint("/feed", 200, factory::concert_json(), 2)
        .build()
        .await?;
    let provider_id = test.providers[0].id;
    let state: AppState = test.to_app_state();

    let (first, second) = tokio::join!(
        state.orchestrator.sync_provider(provider_id),
        state.orchestrator.sync_provider(provider_id)
    );

    assert!(first.is_ok(), "Error: {:?}", first);
    assert!(matches!(
        second,
        Err(Error::SyncError(SyncError::SyncInProgress(id))) if id == provider_id
    ));

    let again = state.orchestrator.sync_provider(provider_id).await;
    assert!(again.is_ok(), "Error: {:?}", again);

    test.assert_mocks();

    Ok(())
}
