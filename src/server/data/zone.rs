//! Zone repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::model::canonical::CanonicalZoneRecord;

/// Repository for the zones of event dates
pub struct ZoneRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ZoneRepository<'a, C> {
    /// Creates a new instance of [`ZoneRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find a zone by its date and the provider's identifier for it
    pub async fn find_by_natural_key(
        &self,
        event_date_id: i32,
        provider_zone_id: &str,
    ) -> Result<Option<entity::zone::Model>, DbErr> {
        entity::prelude::Zone::find()
            .filter(entity::zone::Column::EventDateId.eq(event_date_id))
            .filter(entity::zone::Column::ProviderZoneId.eq(provider_zone_id))
            .one(self.db)
            .await
    }

    /// Create a zone; without a stated remaining count the whole capacity is for sale
    pub async fn create(
        &self,
        event_date_id: i32,
        record: &CanonicalZoneRecord,
    ) -> Result<entity::zone::Model, DbErr> {
        let zone = entity::zone::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            event_date_id: ActiveValue::Set(event_date_id),
            provider_zone_id: ActiveValue::Set(record.provider_zone_id.clone()),
            name: ActiveValue::Set(record.name.clone()),
            capacity: ActiveValue::Set(record.capacity),
            remaining: ActiveValue::Set(record.remaining.unwrap_or(record.capacity)),
            price_cents: ActiveValue::Set(record.price_cents),
            numbered: ActiveValue::Set(record.numbered),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        zone.insert(self.db).await
    }

    /// Overwrite the provider-controlled fields of a zone
    ///
    /// `remaining` is only overwritten when the record states it, so counts set through
    /// [`ZoneRepository::set_remaining`] survive syncs of providers that don't report them.
    /// A kept count is lowered to the new capacity when the zone shrinks.
    pub async fn update(
        &self,
        zone: entity::zone::Model,
        record: &CanonicalZoneRecord,
    ) -> Result<entity::zone::Model, DbErr> {
        let remaining = record
            .remaining
            .unwrap_or_else(|| zone.remaining.min(record.capacity));

        let mut zone: entity::zone::ActiveModel = zone.into();
        zone.name = ActiveValue::Set(record.name.clone());
        zone.capacity = ActiveValue::Set(record.capacity);
        zone.price_cents = ActiveValue::Set(record.price_cents);
        zone.numbered = ActiveValue::Set(record.numbered);
        zone.remaining = ActiveValue::Set(remaining);
        zone.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        zone.update(self.db).await
    }

    /// Set the remaining ticket count of a zone, returning `None` if it doesn't exist
    ///
    /// Entry point for the sales system; negative counts are clamped to zero.
    pub async fn set_remaining(
        &self,
        zone_id: i32,
        remaining: i32,
    ) -> Result<Option<entity::zone::Model>, DbErr> {
        let Some(zone) = entity::prelude::Zone::find_by_id(zone_id).one(self.db).await? else {
            return Ok(None);
        };

        let mut zone: entity::zone::ActiveModel = zone.into();
        zone.remaining = ActiveValue::Set(remaining.max(0));
        zone.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        zone.update(self.db).await.map(Some)
    }

    /// Get every zone of an event date, oldest first
    pub async fn get_by_event_date_id(
        &self,
        event_date_id: i32,
    ) -> Result<Vec<entity::zone::Model>, DbErr> {
        entity::prelude::Zone::find()
            .filter(entity::zone::Column::EventDateId.eq(event_date_id))
            .order_by_asc(entity::zone::Column::Id)
            .all(self.db)
            .await
    }
}
