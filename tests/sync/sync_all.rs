//! Tests for ProviderSyncOrchestrator::sync_all.

use super::*;

/// Tests a batch where one provider fails.
///
/// Verifies the failing provider is reported with its error while the providers around it
/// are still synced and committed.
///
/// Expected: Ok with 2 successes and 1 UpstreamUnavailable failure, in creation order
#[tokio::test]
async fn isolates_provider_failures() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("First", "/first")
        .with_provider("Broken", "/broken")
        .with_provider("Third", "/third")
        .with_resource_endpoint("/first", 200, factory::concert_json(), 1)
        .with_resource_endpoint("/broken", 404, "Not Found", 1)
        .with_resource_endpoint("/third", 200, factory::catalog_json(), 1)
        .build()
        .await?;
    let state: AppState = test.to_app_state();

    let report = state
        .orchestrator
        .sync_all()
        .await
        .expect("batch should run");

    test.assert_mocks();
    assert_eq!(report.succeeded(), 2);
    assert_eq!(report.failed(), 1);

    let names = report
        .reports
        .iter()
        .map(|r| r.provider_name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["First", "Broken", "Third"]);

    let broken = report
        .for_provider(test.providers[1].id)
        .expect("broken provider should be reported");
    assert!(matches!(
        broken.result,
        Err(Error::SyncError(SyncError::UpstreamUnavailable { .. }))
    ));

    assert_eq!(row_counts(&test).await?, (3, 3, 3));

    Ok(())
}

/// Tests a batch that includes a provider without a resource.
///
/// Expected: Ok with MissingResource reported for that provider only
#[tokio::test]
async fn reports_missing_resource() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .with_resource_endpoint("/feed", 200, factory::concert_json(), 1)
        .build()
        .await?;
    let bare = test
        .catalog()
        .insert_provider_without_resource("Bare")
        .await?;
    let state: AppState = test.to_app_state();

    let report = state
        .orchestrator
        .sync_all()
        .await
        .expect("batch should run");

    test.assert_mocks();
    assert_eq!(report.reports.len(), 2);
    assert!(report
        .for_provider(test.providers[0].id)
        .is_some_and(|r| r.result.is_ok()));
    assert!(matches!(
        report.for_provider(bare.id).map(|r| &r.result),
        Some(Err(Error::SyncError(SyncError::MissingResource(_))))
    ));

    Ok(())
}

/// Tests a batch with no providers.
///
/// Expected: Ok with an empty report
#[tokio::test]
async fn empty_batch() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ingestion_tables().build().await?;
    let state: AppState = test.to_app_state();

    let report = state
        .orchestrator
        .sync_all()
        .await
        .expect("batch should run");

    assert!(report.reports.is_empty());
    assert_eq!(report.failed(), 0);

    Ok(())
}
