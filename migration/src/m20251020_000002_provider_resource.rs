use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251020_000001_provider::Provider;

static FK_PROVIDER_RESOURCE_PROVIDER_ID: &str = "fk-provider_resource-provider_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderResource::Table)
                    .if_not_exists()
                    .col(pk_auto(ProviderResource::Id))
                    .col(integer_uniq(ProviderResource::ProviderId))
                    .col(string(ProviderResource::Url))
                    .col(string_null(ProviderResource::Format))
                    .col(timestamp_null(ProviderResource::FetchedAt))
                    .col(timestamp(ProviderResource::CreatedAt))
                    .col(timestamp(ProviderResource::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_PROVIDER_RESOURCE_PROVIDER_ID)
                            .from(ProviderResource::Table, ProviderResource::ProviderId)
                            .to(Provider::Table, Provider::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProviderResource::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ProviderResource {
    Table,
    Id,
    ProviderId,
    Url,
    Format,
    FetchedAt,
    CreatedAt,
    UpdatedAt,
}
