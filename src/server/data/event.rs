//! Event repository.

use chrono::{NaiveDate, NaiveTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::canonical::CanonicalEventRecord;

/// Repository for catalog events
pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    /// Creates a new instance of [`EventRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Find an event by its provider and the provider's identifier for it
    pub async fn find_by_natural_key(
        &self,
        provider_id: i32,
        provider_event_id: &str,
    ) -> Result<Option<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::ProviderId.eq(provider_id))
            .filter(entity::event::Column::ProviderEventId.eq(provider_event_id))
            .one(self.db)
            .await
    }

    /// Create an event for a provider from its canonical record
    pub async fn create(
        &self,
        provider_id: i32,
        record: &CanonicalEventRecord,
    ) -> Result<entity::event::Model, DbErr> {
        let event = entity::event::ActiveModel {
            uuid: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(record.title.clone()),
            active: ActiveValue::Set(record.active),
            provider_id: ActiveValue::Set(Some(provider_id)),
            provider_event_id: ActiveValue::Set(record.provider_event_id.clone()),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        event.insert(self.db).await
    }

    /// Overwrite the provider-controlled fields of an existing event
    ///
    /// Identity, provider and `created_at` are preserved; `updated_at` is always refreshed.
    pub async fn update(
        &self,
        event: entity::event::Model,
        record: &CanonicalEventRecord,
    ) -> Result<entity::event::Model, DbErr> {
        let mut event: entity::event::ActiveModel = event.into();
        event.title = ActiveValue::Set(record.title.clone());
        event.active = ActiveValue::Set(record.active);
        event.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        event.update(self.db).await
    }

    /// Get every event of a provider, oldest first
    pub async fn get_by_provider_id(
        &self,
        provider_id: i32,
    ) -> Result<Vec<entity::event::Model>, DbErr> {
        entity::prelude::Event::find()
            .filter(entity::event::Column::ProviderId.eq(provider_id))
            .order_by_asc(entity::event::Column::CreatedAt)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await
    }

    /// Active events owning at least one active date inside the sale window filters
    ///
    /// A date qualifies when its sale starts on or after `start` and its sale ends on or
    /// before `end`, comparing calendar dates. Dates without the bound being filtered on never
    /// qualify for that filter. Results are ordered by event creation.
    pub async fn list_active(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<entity::event::Model>, DbErr> {
        let mut dates = entity::prelude::EventDate::find()
            .select_only()
            .column(entity::event_date::Column::EventId)
            .filter(entity::event_date::Column::Active.eq(true));

        if let Some(start) = start {
            dates = dates.filter(
                entity::event_date::Column::SaleStartDate.gte(start.and_time(NaiveTime::MIN)),
            );
        }

        if let Some(end) = end {
            dates = match end.succ_opt() {
                Some(next_day) => dates.filter(
                    entity::event_date::Column::SaleEndDate.lt(next_day.and_time(NaiveTime::MIN)),
                ),
                None => dates.filter(entity::event_date::Column::SaleEndDate.is_not_null()),
            };
        }

        let event_ids: Vec<i32> = dates.distinct().into_tuple().all(self.db).await?;

        entity::prelude::Event::find()
            .filter(entity::event::Column::Id.is_in(event_ids))
            .filter(entity::event::Column::Active.eq(true))
            .order_by_asc(entity::event::Column::CreatedAt)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await
    }

    /// Clear the provider reference of every event of a provider
    pub async fn detach_provider(&self, provider_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Event::update_many()
            .col_expr(
                entity::event::Column::ProviderId,
                Expr::value(Option::<i32>::None),
            )
            .col_expr(
                entity::event::Column::UpdatedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::event::Column::ProviderId.eq(provider_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Delete an event together with its dates and their zones
    ///
    /// # Returns
    /// - `Ok(true)` - Event deleted
    /// - `Ok(false)` - No event with this ID
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let date_ids: Vec<i32> = entity::prelude::EventDate::find()
            .select_only()
            .column(entity::event_date::Column::Id)
            .filter(entity::event_date::Column::EventId.eq(id))
            .into_tuple()
            .all(self.db)
            .await?;

        entity::prelude::Zone::delete_many()
            .filter(entity::zone::Column::EventDateId.is_in(date_ids))
            .exec(self.db)
            .await?;

        entity::prelude::EventDate::delete_many()
            .filter(entity::event_date::Column::EventId.eq(id))
            .exec(self.db)
            .await?;

        let result = entity::prelude::Event::delete_many()
            .filter(entity::event::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
