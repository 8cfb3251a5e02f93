//! Provider and catalog row fixtures.
//!
//! Rows are inserted straight through SeaORM so tests can arrange state without going
//! through the code under test.

use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue};
use uuid::Uuid;

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn catalog(&self) -> CatalogFixtures<'_> {
        CatalogFixtures { setup: self }
    }
}

pub struct CatalogFixtures<'a> {
    pub setup: &'a TestContext,
}

impl<'a> CatalogFixtures<'a> {
    /// Insert a provider with a resource at `url`.
    pub async fn insert_provider(
        &self,
        name: &str,
        url: &str,
    ) -> Result<(entity::provider::Model, entity::provider_resource::Model), TestError> {
        let provider = self.insert_provider_without_resource(name).await?;

        let resource = entity::provider_resource::ActiveModel {
            provider_id: ActiveValue::Set(provider.id),
            url: ActiveValue::Set(url.to_string()),
            format: ActiveValue::Set(None),
            fetched_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok((provider, resource))
    }

    /// Insert a provider that has no resource configured.
    pub async fn insert_provider_without_resource(
        &self,
        name: &str,
    ) -> Result<entity::provider::Model, TestError> {
        let provider = entity::provider::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(name.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok(provider)
    }

    pub async fn insert_event(
        &self,
        provider_id: Option<i32>,
        provider_event_id: &str,
        title: &str,
        active: bool,
    ) -> Result<entity::event::Model, TestError> {
        let event = entity::event::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(title.to_string()),
            active: ActiveValue::Set(active),
            provider_id: ActiveValue::Set(provider_id),
            provider_event_id: ActiveValue::Set(provider_event_id.to_string()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok(event)
    }

    /// Insert an active event date with the given sale window.
    pub async fn insert_event_date(
        &self,
        event_id: i32,
        provider_date_id: &str,
        date: NaiveDateTime,
        sale_start_date: Option<NaiveDateTime>,
        sale_end_date: Option<NaiveDateTime>,
    ) -> Result<entity::event_date::Model, TestError> {
        let event_date = entity::event_date::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            event_id: ActiveValue::Set(event_id),
            provider_date_id: ActiveValue::Set(provider_date_id.to_string()),
            date: ActiveValue::Set(date),
            sale_start_date: ActiveValue::Set(sale_start_date),
            sale_end_date: ActiveValue::Set(sale_end_date),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok(event_date)
    }

    pub async fn insert_zone(
        &self,
        event_date_id: i32,
        provider_zone_id: &str,
        capacity: i32,
        remaining: i32,
    ) -> Result<entity::zone::Model, TestError> {
        let zone = entity::zone::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            event_date_id: ActiveValue::Set(event_date_id),
            provider_zone_id: ActiveValue::Set(provider_zone_id.to_string()),
            name: ActiveValue::Set(format!("Zone {}", provider_zone_id)),
            capacity: ActiveValue::Set(capacity),
            remaining: ActiveValue::Set(remaining),
            price_cents: ActiveValue::Set(0),
            numbered: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(&self.setup.db)
        .await?;

        Ok(zone)
    }
}
