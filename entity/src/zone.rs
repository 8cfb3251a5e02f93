use sea_orm::entity::prelude::*;

/// A seating zone of an event date.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "zone")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub uuid: Uuid,
    pub event_date_id: i32,
    pub provider_zone_id: String,
    pub name: String,
    pub capacity: i32,
    /// Seats still for sale; written by the provider payload or the sales system
    pub remaining: i32,
    /// Price in cents
    pub price_cents: i64,
    pub numbered: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::event_date::Entity",
        from = "Column::EventDateId",
        to = "super::event_date::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    EventDate,
}

impl Related<super::event_date::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventDate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
