//! Provider resource repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

use crate::server::resource::format::ResourceFormat;

/// Repository for the resource each provider is synced from
pub struct ProviderResourceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProviderResourceRepository<'a, C> {
    /// Creates a new instance of [`ProviderResourceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Configure the resource URL of a provider; no format is known until the first sync
    pub async fn create(
        &self,
        provider_id: i32,
        url: &str,
    ) -> Result<entity::provider_resource::Model, DbErr> {
        let resource = entity::provider_resource::ActiveModel {
            provider_id: ActiveValue::Set(provider_id),
            url: ActiveValue::Set(url.to_string()),
            format: ActiveValue::Set(None),
            fetched_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        resource.insert(self.db).await
    }

    /// Get the resource configured for a provider
    pub async fn get_by_provider_id(
        &self,
        provider_id: i32,
    ) -> Result<Option<entity::provider_resource::Model>, DbErr> {
        entity::prelude::ProviderResource::find()
            .filter(entity::provider_resource::Column::ProviderId.eq(provider_id))
            .one(self.db)
            .await
    }

    /// Point a provider's resource at a new URL
    ///
    /// The previously detected format no longer applies to the new endpoint and is cleared.
    pub async fn update_url(
        &self,
        provider_id: i32,
        url: &str,
    ) -> Result<Option<entity::provider_resource::Model>, DbErr> {
        let Some(resource) = self.get_by_provider_id(provider_id).await? else {
            return Ok(None);
        };

        let mut resource: entity::provider_resource::ActiveModel = resource.into();
        resource.url = ActiveValue::Set(url.to_string());
        resource.format = ActiveValue::Set(None);
        resource.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        resource.update(self.db).await.map(Some)
    }

    /// Record the format detected by a successful sync and the time it completed
    pub async fn record_fetch(
        &self,
        resource: entity::provider_resource::Model,
        format: ResourceFormat,
    ) -> Result<entity::provider_resource::Model, DbErr> {
        let now = Utc::now().naive_utc();

        let mut resource: entity::provider_resource::ActiveModel = resource.into();
        resource.format = ActiveValue::Set(Some(format.as_str().to_string()));
        resource.fetched_at = ActiveValue::Set(Some(now));
        resource.updated_at = ActiveValue::Set(now);

        resource.update(self.db).await
    }

    /// Delete the resource of a provider, returning the number of rows removed
    pub async fn delete_by_provider_id(&self, provider_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::ProviderResource::delete_many()
            .filter(entity::provider_resource::Column::ProviderId.eq(provider_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
