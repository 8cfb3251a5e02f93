//! Tests for ProviderService.

use crate::server::service::provider::ProviderService;

use super::*;

/// Tests creating a provider with its resource.
///
/// Expected: Ok with a provider and a resource pointing at the given URL, format unset
#[tokio::test]
async fn creates_provider_with_resource() -> Result<(), TestError> {
    let test = TestBuilder::new().with_ingestion_tables().build().await?;

    let (provider, resource) = ProviderService::new(&test.db)
        .create_provider("Ticketing", "http://localhost/feed.json")
        .await
        .expect("provider should be created");

    assert_eq!(provider.name, "Ticketing");
    assert_eq!(resource.provider_id, provider.id);
    assert_eq!(resource.url, "http://localhost/feed.json");
    assert!(resource.format.is_none());
    assert!(resource.fetched_at.is_none());

    Ok(())
}

/// Tests listing providers.
///
/// Expected: Ok with providers in creation order
#[tokio::test]
async fn lists_providers_oldest_first() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("First", "/first")
        .with_provider("Second", "/second")
        .build()
        .await?;

    let names = ProviderService::new(&test.db)
        .get_all_providers()
        .await
        .expect("providers should be listed")
        .into_iter()
        .map(|p| p.name)
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["First", "Second"]);

    Ok(())
}

/// Tests renaming a provider, existing and missing.
///
/// Expected: Ok with the new name, then Err with ProviderNotFound
#[tokio::test]
async fn renames_provider() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .build()
        .await?;
    let service = ProviderService::new(&test.db);

    let renamed = service
        .rename_provider(test.providers[0].id, "Renamed")
        .await
        .expect("provider should be renamed");
    assert_eq!(renamed.name, "Renamed");
    assert_eq!(renamed.uuid, test.providers[0].uuid);

    let result = service.rename_provider(999, "Ghost").await;
    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::ProviderNotFound(999)))
    ));

    Ok(())
}

/// Tests updating the resource URL of a provider.
///
/// Verifies an existing resource is repointed and a provider without one gets a new
/// resource.
///
/// Expected: Ok with the new URL in both cases
#[tokio::test]
async fn updates_resource_url() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .build()
        .await?;
    let bare = test
        .catalog()
        .insert_provider_without_resource("Bare")
        .await?;
    let service = ProviderService::new(&test.db);

    let updated = service
        .update_resource_url(test.providers[0].id, "http://localhost/feed.xml")
        .await
        .expect("resource should be updated");
    assert_eq!(updated.url, "http://localhost/feed.xml");

    let created = service
        .update_resource_url(bare.id, "http://localhost/bare.json")
        .await
        .expect("resource should be created");
    assert_eq!(created.provider_id, bare.id);
    assert_eq!(created.url, "http://localhost/bare.json");

    let result = service.update_resource_url(999, "http://localhost/").await;
    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::ProviderNotFound(999)))
    ));

    Ok(())
}

/// Tests deleting a provider.
///
/// Verifies the provider and its resource are removed while its events stay listed
/// without a provider.
///
/// Expected: Ok, then Err with ProviderNotFound on a second delete
#[tokio::test]
async fn deletes_provider_and_keeps_events() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_ingestion_tables()
        .with_provider("Provider", "/feed")
        .build()
        .await?;
    let provider_id = test.providers[0].id;
    let event = test
        .catalog()
        .insert_event(Some(provider_id), "291", "Concert", true)
        .await?;
    let service = ProviderService::new(&test.db);

    service
        .delete_provider(provider_id)
        .await
        .expect("provider should be deleted");

    assert!(service
        .get_all_providers()
        .await
        .expect("providers should be listed")
        .is_empty());
    assert_eq!(
        entity::prelude::ProviderResource::find()
            .count(&test.db)
            .await?,
        0
    );
    let orphan = entity::prelude::Event::find_by_id(event.id)
        .one(&test.db)
        .await?
        .expect("event should be kept");
    assert_eq!(orphan.provider_id, None);

    let result = service.delete_provider(provider_id).await;
    assert!(matches!(
        result,
        Err(Error::SyncError(SyncError::ProviderNotFound(id))) if id == provider_id
    ));

    Ok(())
}
