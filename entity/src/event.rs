use sea_orm::entity::prelude::*;

/// A catalog event, identified within its provider by `provider_event_id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub title: String,
    pub active: bool,
    /// `None` once the owning provider has been deleted
    pub provider_id: Option<i32>,
    pub provider_event_id: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::provider::Entity",
        from = "Column::ProviderId",
        to = "super::provider::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Provider,
    #[sea_orm(has_many = "super::event_date::Entity")]
    EventDate,
}

impl Related<super::provider::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Provider.def()
    }
}

impl Related<super::event_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventDate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
