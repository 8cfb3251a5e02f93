use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251020_000003_event::Event;

static IDX_EVENT_DATE_EVENT_ID: &str = "idx-event_date-event_id";
static IDX_EVENT_DATE_NATURAL_KEY: &str = "idx-event_date-event_id-provider_date_id";
static FK_EVENT_DATE_EVENT_ID: &str = "fk-event_date-event_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventDate::Table)
                    .if_not_exists()
                    .col(pk_auto(EventDate::Id))
                    .col(uuid_uniq(EventDate::Uuid))
                    .col(integer(EventDate::EventId))
                    .col(string(EventDate::ProviderDateId))
                    .col(timestamp(EventDate::Date))
                    .col(timestamp_null(EventDate::SaleStartDate))
                    .col(timestamp_null(EventDate::SaleEndDate))
                    .col(boolean(EventDate::Active).default(true))
                    .col(timestamp(EventDate::CreatedAt))
                    .col(timestamp(EventDate::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_EVENT_DATE_EVENT_ID)
                            .from(EventDate::Table, EventDate::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_DATE_EVENT_ID)
                    .table(EventDate::Table)
                    .col(EventDate::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_DATE_NATURAL_KEY)
                    .table(EventDate::Table)
                    .col(EventDate::EventId)
                    .col(EventDate::ProviderDateId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVENT_DATE_NATURAL_KEY)
                    .table(EventDate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVENT_DATE_EVENT_ID)
                    .table(EventDate::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(EventDate::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum EventDate {
    Table,
    Id,
    Uuid,
    EventId,
    ProviderDateId,
    Date,
    SaleStartDate,
    SaleEndDate,
    Active,
    CreatedAt,
    UpdatedAt,
}
