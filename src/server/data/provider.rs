//! Provider repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::data::{event::EventRepository, provider_resource::ProviderResourceRepository};

/// Repository for catalog providers
pub struct ProviderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProviderRepository<'a, C> {
    /// Creates a new instance of [`ProviderRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Create a provider with a fresh public identifier
    pub async fn create(&self, name: &str) -> Result<entity::provider::Model, DbErr> {
        let provider = entity::provider::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        provider.insert(self.db).await
    }

    /// Get a provider by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::provider::Model>, DbErr> {
        entity::prelude::Provider::find_by_id(id).one(self.db).await
    }

    /// Get all providers, oldest first
    pub async fn get_all(&self) -> Result<Vec<entity::provider::Model>, DbErr> {
        entity::prelude::Provider::find()
            .order_by_asc(entity::provider::Column::CreatedAt)
            .order_by_asc(entity::provider::Column::Id)
            .all(self.db)
            .await
    }

    /// Rename a provider, returning `None` if it doesn't exist
    pub async fn rename(
        &self,
        id: i32,
        name: &str,
    ) -> Result<Option<entity::provider::Model>, DbErr> {
        let Some(provider) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let mut provider: entity::provider::ActiveModel = provider.into();
        provider.name = ActiveValue::Set(name.to_string());
        provider.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        provider.update(self.db).await.map(Some)
    }

    /// Delete a provider and its resource configuration, detaching its events
    ///
    /// Events outlive their provider with `provider_id` cleared. Pass a transaction as the
    /// connection to make the three steps atomic.
    ///
    /// # Returns
    /// - `Ok(true)` - Provider deleted
    /// - `Ok(false)` - No provider with this ID
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        EventRepository::new(self.db).detach_provider(id).await?;
        ProviderResourceRepository::new(self.db)
            .delete_by_provider_id(id)
            .await?;

        let result = entity::prelude::Provider::delete_many()
            .filter(entity::provider::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
