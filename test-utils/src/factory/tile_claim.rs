//! Planner tile claim factory.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating claim records on a planner.
///
/// Defaults to an unclaimed record. Use `claimed_by` to attach a claimant; the claim
/// timestamp defaults to now when a claimant is set.
pub struct TileClaimFactory<'a> {
    db: &'a DatabaseConnection,
    planner_channel_id: String,
    tile: String,
    claimed_by: Option<String>,
    claimed_at: Option<DateTime<Utc>>,
}

impl<'a> TileClaimFactory<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        planner_channel_id: impl Into<String>,
        tile: impl Into<String>,
    ) -> Self {
        Self {
            db,
            planner_channel_id: planner_channel_id.into(),
            tile: tile.into(),
            claimed_by: None,
            claimed_at: None,
        }
    }

    /// Sets the claimant.
    pub fn claimed_by(mut self, user_id: impl Into<String>) -> Self {
        self.claimed_by = Some(user_id.into());
        if self.claimed_at.is_none() {
            self.claimed_at = Some(Utc::now());
        }
        self
    }

    /// Sets the claim timestamp.
    pub fn claimed_at(mut self, claimed_at: DateTime<Utc>) -> Self {
        self.claimed_at = Some(claimed_at);
        self
    }

    /// Builds and inserts the claim entity into the database.
    pub async fn build(self) -> Result<entity::planner_tile_claim::Model, DbErr> {
        entity::planner_tile_claim::ActiveModel {
            id: ActiveValue::NotSet,
            planner_channel_id: ActiveValue::Set(self.planner_channel_id),
            tile: ActiveValue::Set(self.tile),
            claimed_by: ActiveValue::Set(self.claimed_by),
            claimed_at: ActiveValue::Set(self.claimed_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a claim on `tile` by `user_id` in the given planner.
pub async fn create_claim(
    db: &DatabaseConnection,
    planner_channel_id: &str,
    tile: &str,
    user_id: &str,
) -> Result<entity::planner_tile_claim::Model, DbErr> {
    TileClaimFactory::new(db, planner_channel_id, tile)
        .claimed_by(user_id)
        .build()
        .await
}
