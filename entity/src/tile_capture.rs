use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tile_capture")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub claims_channel_id: String,
    pub user_id: String,
    pub tile: String,
    pub captured_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
