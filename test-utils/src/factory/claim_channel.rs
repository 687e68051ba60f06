//! Claim channel factory.
//!
//! Claim channels are the channels the external ticket tracker watches for captures.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

pub struct ClaimChannelFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    guild_id: String,
}

impl<'a> ClaimChannelFactory<'a> {
    /// Creates a new ClaimChannelFactory with unique channel and guild ids.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            channel_id: (2_000_000 + id).to_string(),
            guild_id: (3_000_000 + id).to_string(),
        }
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Builds and inserts the claim channel entity into the database.
    pub async fn build(self) -> Result<entity::claim_channel::Model, DbErr> {
        entity::claim_channel::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(self.channel_id),
            guild_id: ActiveValue::Set(self.guild_id),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a tracked claim channel with default values.
pub async fn create_claim_channel(
    db: &DatabaseConnection,
) -> Result<entity::claim_channel::Model, DbErr> {
    ClaimChannelFactory::new(db).build().await
}
