//! Domain model for captures logged by the ticket tracker.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::parse_id_column;

/// One capture row written by the ticket tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct TileCapture {
    pub id: i32,
    pub claims_channel_id: u64,
    pub user_id: u64,
    pub tile: String,
    pub captured_at: DateTime<Utc>,
}

impl TileCapture {
    pub fn from_entity(entity: entity::tile_capture::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            claims_channel_id: parse_id_column("claims_channel_id", &entity.claims_channel_id)?,
            user_id: parse_id_column("user_id", &entity.user_id)?,
            tile: entity.tile,
            captured_at: entity.captured_at,
        })
    }
}
