//! Provider administration.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{provider::ProviderRepository, provider_resource::ProviderResourceRepository},
    error::{sync::SyncError, Error},
};

/// Administration of providers and their resource configuration.
pub struct ProviderService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProviderService<'a> {
    /// Creates a new instance of [`ProviderService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a provider together with the resource it is synced from
    pub async fn create_provider(
        &self,
        name: &str,
        url: &str,
    ) -> Result<(entity::provider::Model, entity::provider_resource::Model), Error> {
        let txn = self.db.begin().await?;

        let provider = ProviderRepository::new(&txn).create(name).await?;
        let resource = ProviderResourceRepository::new(&txn)
            .create(provider.id, url)
            .await?;

        txn.commit().await?;

        tracing::info!(provider_id = provider.id, "Created provider {:?}", name);

        Ok((provider, resource))
    }

    /// Renames a provider, failing with `ProviderNotFound` if it doesn't exist
    pub async fn rename_provider(
        &self,
        provider_id: i32,
        name: &str,
    ) -> Result<entity::provider::Model, Error> {
        ProviderRepository::new(self.db)
            .rename(provider_id, name)
            .await?
            .ok_or_else(|| SyncError::ProviderNotFound(provider_id).into())
    }

    /// Points the provider at a new resource URL, configuring one if it had none
    pub async fn update_resource_url(
        &self,
        provider_id: i32,
        url: &str,
    ) -> Result<entity::provider_resource::Model, Error> {
        let txn = self.db.begin().await?;

        if ProviderRepository::new(&txn)
            .get_by_id(provider_id)
            .await?
            .is_none()
        {
            return Err(SyncError::ProviderNotFound(provider_id).into());
        }

        let resource_repo = ProviderResourceRepository::new(&txn);
        let resource = match resource_repo.update_url(provider_id, url).await? {
            Some(resource) => resource,
            None => resource_repo.create(provider_id, url).await?,
        };

        txn.commit().await?;

        Ok(resource)
    }

    /// Deletes a provider and its resource; its events are kept without a provider
    pub async fn delete_provider(&self, provider_id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let deleted = ProviderRepository::new(&txn).delete(provider_id).await?;
        if !deleted {
            return Err(SyncError::ProviderNotFound(provider_id).into());
        }

        txn.commit().await?;

        tracing::info!(provider_id, "Deleted provider");

        Ok(())
    }

    /// Get all providers, oldest first
    pub async fn get_all_providers(&self) -> Result<Vec<entity::provider::Model>, Error> {
        Ok(ProviderRepository::new(self.db).get_all().await?)
    }
}
