//! Planner administration and admin tile operations.
//!
//! Callers check the member's guild permissions before invoking these.

use chrono::{DateTime, Utc};

use crate::server::{
    data::{banner::BannerRepository, planner::PlannerRepository, ticket::TicketRepository},
    error::{planner::PlannerError, AppError},
    model::{
        banner::banner_lifetime,
        planner::{Planner, UpdatePlannerConfigParam},
    },
};

use super::{claim::log_follow_up, PlannerService};

/// Result of moving a tile's expiration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileTimeEdit {
    Edited { tile: String, expires_at: DateTime<Utc> },
    NotABanner(String),
    /// The banner was not captured during the current event.
    NotCaptured { tile: String, claims_channel_id: u64 },
    NoClaimsChannel,
}

impl TileTimeEdit {
    pub fn message(&self) -> String {
        match self {
            TileTimeEdit::Edited { tile, expires_at } => format!(
                "Got it! `{0}` will decay at <t:{1}:t> (<t:{1}:R>)",
                tile,
                expires_at.timestamp()
            ),
            TileTimeEdit::NotABanner(tile) => format!(
                "`{}` doesn't seem to be a valid tile...\n*It's not a banner!*",
                tile
            ),
            TileTimeEdit::NotCaptured {
                tile,
                claims_channel_id,
            } => format!(
                "`{}` doesn't seem to be a valid tile...\n*The banner must have been captured \
                 during the CT to have its time edited. Register the capture in <#{}> first, \
                 __then__ edit the time.*",
                tile, claims_channel_id
            ),
            TileTimeEdit::NoClaimsChannel => {
                "This planner has no tile claim channel, so there are no captures to edit."
                    .to_string()
            }
        }
    }
}

impl<'a> PlannerService<'a> {
    /// Turns a channel into a planner and posts its panel.
    ///
    /// # Returns
    /// - `Ok(Planner)` - The new planner
    /// - `Err(AppError::PlannerErr(AlreadyAPlanner))` - The channel already is a planner
    pub async fn add_planner(
        &self,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Planner, AppError> {
        let planners = PlannerRepository::new(&self.state.db);
        if planners.get_by_channel_id(channel_id).await?.is_some() {
            return Err(PlannerError::AlreadyAPlanner.into());
        }

        let planner = planners.create(channel_id).await?;
        tracing::info!("Created planner {}", channel_id);

        self.send_panel(channel_id, now).await?;

        Ok(planner)
    }

    /// Stops treating a channel as a planner. Its messages are left in place.
    pub async fn remove_planner(&self, channel_id: u64) -> Result<(), AppError> {
        self.require_planner(channel_id).await?;

        PlannerRepository::new(&self.state.db)
            .delete(channel_id)
            .await?;
        self.state.forget_planner(channel_id).await;

        tracing::info!("Removed planner {}", channel_id);

        Ok(())
    }

    /// Updates the configuration of a planner and resends its panel.
    ///
    /// # Returns
    /// - `Ok(Planner)` - The updated planner
    /// - `Err(AppError::PlannerErr)` - Not a planner, the claims channel is linked to another
    ///   planner or not tracked, or nothing to change
    pub async fn configure_planner(
        &self,
        param: UpdatePlannerConfigParam,
        now: DateTime<Utc>,
    ) -> Result<Planner, AppError> {
        let planners = PlannerRepository::new(&self.state.db);
        self.require_planner(param.channel_id).await?;

        if let Some(claims_channel_id) = param.claims_channel_id {
            if let Some(linked) = planners.get_linked_to(claims_channel_id).await? {
                if linked.channel_id != param.channel_id {
                    return Err(PlannerError::ClaimsChannelAlreadyLinked(claims_channel_id).into());
                }
            }
            if !TicketRepository::new(&self.state.db)
                .is_channel_tracked(claims_channel_id)
                .await?
            {
                return Err(PlannerError::ClaimsChannelNotTracked(claims_channel_id).into());
            }
        }

        if param.is_empty() {
            return Err(PlannerError::NothingToConfigure.into());
        }

        let channel_id = param.channel_id;
        let planner = planners
            .update_config(param)
            .await?
            .ok_or(PlannerError::NotAPlanner)?;
        tracing::info!("Updated configuration of planner {}", channel_id);

        self.send_panel(channel_id, now).await?;

        Ok(planner)
    }

    /// Flips whether a planner sends pings.
    ///
    /// # Returns
    /// - `Ok(bool)` - The new active state
    pub async fn toggle_active(
        &self,
        channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let planner = self.require_planner(channel_id).await?;
        let is_active = !planner.is_active;

        PlannerRepository::new(&self.state.db)
            .update_config(UpdatePlannerConfigParam {
                is_active: Some(is_active),
                ..UpdatePlannerConfigParam::new(channel_id)
            })
            .await?;
        tracing::info!("Planner {} is now active: {}", channel_id, is_active);

        self.refresh_decay_watch(now).await?;
        self.send_panel(channel_id, now).await?;

        Ok(is_active)
    }

    /// Releases a tile regardless of who claimed it.
    ///
    /// # Returns
    /// - `Ok(u64)` - Member who held the claim
    /// - `Err(AppError::PlannerErr(TileNotClaimed))` - Nobody claimed the tile
    pub async fn force_unclaim(
        &self,
        channel_id: u64,
        tile: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, AppError> {
        let planner = self.require_planner(channel_id).await?;

        let previous = BannerRepository::new(&self.state.db)
            .unclaim_tile(channel_id, tile)
            .await?
            .ok_or_else(|| PlannerError::TileNotClaimed(tile.to_string()))?;
        tracing::info!(
            "Force unclaimed {} from {} in planner {}",
            tile,
            previous,
            channel_id
        );

        log_follow_up("send panel", channel_id, self.send_panel(channel_id, now).await);
        log_follow_up(
            "sync tickets role",
            channel_id,
            self.sync_claimant_role(&planner, previous, now).await,
        );

        Ok(previous)
    }

    /// Moves the expiration of a banner by rewriting its latest capture.
    ///
    /// # Arguments
    /// - `channel_id` - Planner channel
    /// - `tile` - Banner tile code
    /// - `expires_at` - New expiration time
    /// - `now` - Current time
    pub async fn edit_tile_time(
        &self,
        channel_id: u64,
        tile: &str,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<TileTimeEdit, AppError> {
        let planner = self.require_planner(channel_id).await?;
        let Some(claims_channel_id) = planner.claims_channel_id else {
            return Ok(TileTimeEdit::NoClaimsChannel);
        };

        let tiles = self.state.banner_tiles(now).await?;
        if !tiles.iter().any(|banner| banner == tile) {
            return Ok(TileTimeEdit::NotABanner(tile.to_string()));
        }

        let edited = TicketRepository::new(&self.state.db)
            .edit_capture_time(
                claims_channel_id,
                tile,
                self.event_start(now),
                expires_at - banner_lifetime(),
            )
            .await?;
        if !edited {
            return Ok(TileTimeEdit::NotCaptured {
                tile: tile.to_string(),
                claims_channel_id,
            });
        }
        tracing::info!(
            "Moved expiration of {} in planner {} to {}",
            tile,
            channel_id,
            expires_at
        );

        self.refresh_decay_watch(now).await?;
        log_follow_up("send panel", channel_id, self.send_panel(channel_id, now).await);

        let status = BannerRepository::new(&self.state.db)
            .get_tile_status(channel_id, tile, self.event_start(now))
            .await?;
        if let Some(claimant) = status.and_then(|status| status.claimed_by) {
            log_follow_up(
                "sync tickets role",
                channel_id,
                self.sync_claimant_role(&planner, claimant, now).await,
            );
        }

        Ok(TileTimeEdit::Edited {
            tile: tile.to_string(),
            expires_at,
        })
    }

    async fn sync_claimant_role(
        &self,
        planner: &Planner,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        match self.guild_of(planner).await? {
            Some(guild_id) => self.sync_role_of(guild_id, user_id, planner, now).await,
            None => Ok(()),
        }
    }
}
