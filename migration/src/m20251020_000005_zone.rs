use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251020_000004_event_date::EventDate;

static IDX_ZONE_EVENT_DATE_ID: &str = "idx-zone-event_date_id";
static IDX_ZONE_NATURAL_KEY: &str = "idx-zone-event_date_id-provider_zone_id";
static FK_ZONE_EVENT_DATE_ID: &str = "fk-zone-event_date_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Zone::Table)
                    .if_not_exists()
                    .col(pk_auto(Zone::Id))
                    .col(uuid_uniq(Zone::Uuid))
                    .col(integer(Zone::EventDateId))
                    .col(string(Zone::ProviderZoneId))
                    .col(string(Zone::Name))
                    .col(integer(Zone::Capacity))
                    .col(integer(Zone::Remaining))
                    .col(big_integer(Zone::PriceCents).default(0))
                    .col(boolean(Zone::Numbered).default(false))
                    .col(timestamp(Zone::CreatedAt))
                    .col(timestamp(Zone::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_ZONE_EVENT_DATE_ID)
                            .from(Zone::Table, Zone::EventDateId)
                            .to(EventDate::Table, EventDate::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ZONE_EVENT_DATE_ID)
                    .table(Zone::Table)
                    .col(Zone::EventDateId)
                    .to_owned(),
            )
            .await?;

        // Zone ids are only unique within their event date
        manager
            .create_index(
                Index::create()
                    .name(IDX_ZONE_NATURAL_KEY)
                    .table(Zone::Table)
                    .col(Zone::EventDateId)
                    .col(Zone::ProviderZoneId)
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
                    .name(IDX_ZONE_NATURAL_KEY)
                    .table(Zone::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ZONE_EVENT_DATE_ID)
                    .table(Zone::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Zone::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Zone {
    Table,
    Id,
    Uuid,
    EventDateId,
    ProviderZoneId,
    Name,
    Capacity,
    Remaining,
    PriceCents,
    Numbered,
    CreatedAt,
    UpdatedAt,
}
