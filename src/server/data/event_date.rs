//! Event date repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::model::canonical::CanonicalDateRecord;

/// Repository for the dates of catalog events
pub struct EventDateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventDateRepository<'a, C> {
    /// Creates a new instance of [`EventDateRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find a date by its event and the provider's identifier for it
    pub async fn find_by_natural_key(
        &self,
        event_id: i32,
        provider_date_id: &str,
    ) -> Result<Option<entity::event_date::Model>, DbErr> {
        entity::prelude::EventDate::find()
            .filter(entity::event_date::Column::EventId.eq(event_id))
            .filter(entity::event_date::Column::ProviderDateId.eq(provider_date_id))
            .one(self.db)
            .await
    }

    /// Create an active date for an event from its canonical record
    pub async fn create(
        &self,
        event_id: i32,
        record: &CanonicalDateRecord,
    ) -> Result<entity::event_date::Model, DbErr> {
        let date = entity::event_date::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            event_id: ActiveValue::Set(event_id),
            provider_date_id: ActiveValue::Set(record.provider_date_id.clone()),
            date: ActiveValue::Set(record.date),
            sale_start_date: ActiveValue::Set(record.sale_start_date),
            sale_end_date: ActiveValue::Set(record.sale_end_date),
            active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        date.insert(self.db).await
    }

    /// Overwrite the date and sale window; `active` is not provider-controlled and is kept
    pub async fn update(
        &self,
        date: entity::event_date::Model,
        record: &CanonicalDateRecord,
    ) -> Result<entity::event_date::Model, DbErr> {
        let mut date: entity::event_date::ActiveModel = date.into();
        date.date = ActiveValue::Set(record.date);
        date.sale_start_date = ActiveValue::Set(record.sale_start_date);
        date.sale_end_date = ActiveValue::Set(record.sale_end_date);
        date.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        date.update(self.db).await
    }

    /// Get every date of an event, oldest first
    pub async fn get_by_event_id(
        &self,
        event_id: i32,
    ) -> Result<Vec<entity::event_date::Model>, DbErr> {
        entity::prelude::EventDate::find()
            .filter(entity::event_date::Column::EventId.eq(event_id))
            .order_by_asc(entity::event_date::Column::Date)
            .order_by_asc(entity::event_date::Column::Id)
            .all(self.db)
            .await
    }

    /// Whether no zone of the date has tickets remaining
    ///
    /// A date without zones is sold out.
    pub async fn is_sold_out(&self, event_date_id: i32) -> Result<bool, DbErr> {
        let available = entity::prelude::Zone::find()
            .filter(entity::zone::Column::EventDateId.eq(event_date_id))
            .filter(entity::zone::Column::Remaining.gt(0))
            .count(self.db)
            .await?;

        Ok(available == 0)
    }
}
