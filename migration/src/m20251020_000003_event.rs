use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251020_000001_provider::Provider;

static IDX_EVENT_PROVIDER_ID: &str = "idx-event-provider_id";
static IDX_EVENT_NATURAL_KEY: &str = "idx-event-provider_id-provider_event_id";
static FK_EVENT_PROVIDER_ID: &str = "fk-event-provider_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(uuid_uniq(Event::Uuid))
                    .col(string(Event::Title))
                    .col(boolean(Event::Active).default(true))
                    .col(integer_null(Event::ProviderId))
                    .col(string(Event::ProviderEventId))
                    .col(timestamp(Event::CreatedAt))
                    .col(timestamp(Event::UpdatedAt))
                    // Events outlive their provider
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_EVENT_PROVIDER_ID)
                            .from(Event::Table, Event::ProviderId)
                            .to(Provider::Table, Provider::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_PROVIDER_ID)
                    .table(Event::Table)
                    .col(Event::ProviderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EVENT_NATURAL_KEY)
                    .table(Event::Table)
                    .col(Event::ProviderId)
                    .col(Event::ProviderEventId)
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
                    .name(IDX_EVENT_NATURAL_KEY)
                    .table(Event::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EVENT_PROVIDER_ID)
                    .table(Event::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Uuid,
    Title,
    Active,
    ProviderId,
    ProviderEventId,
    CreatedAt,
    UpdatedAt,
}
