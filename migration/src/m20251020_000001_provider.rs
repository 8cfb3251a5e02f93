use sea_orm_migration::{prelude::*, schema::*};

static IDX_PROVIDER_CREATED_AT: &str = "idx-provider-created_at";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Provider::Table)
                    .if_not_exists()
                    .col(pk_auto(Provider::Id))
                    .col(uuid_uniq(Provider::Uuid))
                    .col(string(Provider::Name))
                    .col(timestamp(Provider::CreatedAt))
                    .col(timestamp(Provider::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PROVIDER_CREATED_AT)
                    .table(Provider::Table)
                    .col(Provider::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PROVIDER_CREATED_AT)
                    .table(Provider::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Provider::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Provider {
    Table,
    Id,
    Uuid,
    Name,
    CreatedAt,
    UpdatedAt,
}
