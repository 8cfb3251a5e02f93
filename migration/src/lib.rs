pub use sea_orm_migration::prelude::*;

mod m20251020_000001_provider;
mod m20251020_000002_provider_resource;
mod m20251020_000003_event;
mod m20251020_000004_event_date;
mod m20251020_000005_zone;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251020_000001_provider::Migration),
            Box::new(m20251020_000002_provider_resource::Migration),
            Box::new(m20251020_000003_event::Migration),
            Box::new(m20251020_000004_event_date::Migration),
            Box::new(m20251020_000005_zone::Migration),
        ]
    }
}
