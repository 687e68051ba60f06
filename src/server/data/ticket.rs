//! Ticket log repository.
//!
//! The ticket tracker writes one `tile_capture` row per capture and registers the channels it
//! watches in `claim_channel`. The planner only reads the log, except for the admin
//! operation that corrects the time of a capture. New rows are picked up by id, since ids
//! only grow as the tracker appends.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::ticket::TileCapture;

pub struct TicketRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TicketRepository<'a> {
    /// Creates a new TicketRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Moves the latest capture of a tile to a new time.
    ///
    /// Only captures made at or after `since` (the event start) are considered.
    ///
    /// # Arguments
    /// - `claims_channel_id` - Channel the capture was logged in
    /// - `tile` - Tile code
    /// - `since` - Start of the current event
    /// - `captured_at` - New capture time
    ///
    /// # Returns
    /// - `Ok(true)` - Capture updated
    /// - `Ok(false)` - Tile was not captured during the event
    /// - `Err(DbErr)` - Database error during query or update
    pub async fn edit_capture_time(
        &self,
        claims_channel_id: u64,
        tile: &str,
        since: DateTime<Utc>,
        captured_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let latest = entity::prelude::TileCapture::find()
            .filter(entity::tile_capture::Column::ClaimsChannelId.eq(claims_channel_id.to_string()))
            .filter(entity::tile_capture::Column::Tile.eq(tile))
            .filter(entity::tile_capture::Column::CapturedAt.gte(since))
            .order_by_desc(entity::tile_capture::Column::CapturedAt)
            .one(self.db)
            .await?;

        let Some(latest) = latest else {
            return Ok(false);
        };

        let mut active: entity::tile_capture::ActiveModel = latest.into();
        active.captured_at = ActiveValue::Set(captured_at);
        active.update(self.db).await?;

        Ok(true)
    }

    /// Counts the captures of a member in `[from, to)`.
    ///
    /// Every capture costs one ticket, so this is the number of tickets used in the window.
    pub async fn count_captures_between(
        &self,
        user_id: u64,
        claims_channel_id: u64,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::TileCapture::find()
            .filter(entity::tile_capture::Column::UserId.eq(user_id.to_string()))
            .filter(entity::tile_capture::Column::ClaimsChannelId.eq(claims_channel_id.to_string()))
            .filter(entity::tile_capture::Column::CapturedAt.gte(from))
            .filter(entity::tile_capture::Column::CapturedAt.lt(to))
            .count(self.db)
            .await
    }

    /// Returns whether the ticket tracker watches a channel.
    pub async fn is_channel_tracked(&self, channel_id: u64) -> Result<bool, DbErr> {
        let count = entity::prelude::ClaimChannel::find()
            .filter(entity::claim_channel::Column::ChannelId.eq(channel_id.to_string()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Id of the most recent capture row, `None` while the log is empty.
    pub async fn latest_capture_id(&self) -> Result<Option<i32>, DbErr> {
        let latest = entity::prelude::TileCapture::find()
            .order_by_desc(entity::tile_capture::Column::Id)
            .one(self.db)
            .await?;

        Ok(latest.map(|capture| capture.id))
    }

    /// Captures logged after the row `after_id`, oldest first.
    ///
    /// # Arguments
    /// - `after_id` - Last row already handled
    /// - `limit` - Maximum number of rows returned
    pub async fn get_captures_after(
        &self,
        after_id: i32,
        limit: u64,
    ) -> Result<Vec<TileCapture>, DbErr> {
        let captures = entity::prelude::TileCapture::find()
            .filter(entity::tile_capture::Column::Id.gt(after_id))
            .order_by_asc(entity::tile_capture::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        captures.into_iter().map(TileCapture::from_entity).collect()
    }
}
