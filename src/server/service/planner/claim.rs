//! Tile claims and the bridge from the ticket tracker's capture events.

use chrono::{DateTime, Utc};

use crate::server::{
    data::{banner::BannerRepository, planner::PlannerRepository, ticket::TicketRepository},
    error::{planner::PlannerError, AppError},
    model::{
        banner::{GetPlannedBannersParam, PlannedBanner},
        discord::GuildMember,
        planner::{Planner, UpdatePlannerConfigParam},
    },
};

use super::{PlannerService, MAX_CLAIMS_PER_USER};

/// Capture rows read per poll of the ticket log.
const CAPTURE_BATCH: u64 = 100;

/// Result of toggling a claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimToggle {
    Claimed(String),
    Unclaimed(String),
}

impl ClaimToggle {
    /// Reply shown to the member who pressed the button.
    pub fn message(&self) -> String {
        match self {
            ClaimToggle::Claimed(tile) => format!(
                "You have claimed `{}`!\n*Select it again if you want to unclaim it.*",
                tile
            ),
            ClaimToggle::Unclaimed(tile) => format!("You have unclaimed `{}`!", tile),
        }
    }
}

/// Logs the failure of a follow-up step that must not undo the operation before it.
pub(super) fn log_follow_up(step: &str, planner_channel_id: u64, result: Result<(), AppError>) {
    if let Err(e) = result {
        tracing::error!(
            "Failed to {} for planner {}: {}",
            step,
            planner_channel_id,
            e
        );
    }
}

impl<'a> PlannerService<'a> {
    /// Claims a tile for a member, or releases it if they already hold it.
    ///
    /// After a change the member's tickets role is re-evaluated and the panel is resent.
    ///
    /// # Arguments
    /// - `guild_id` - Guild the button was pressed in
    /// - `member` - Member who pressed the button
    /// - `planner_channel_id` - Planner the tile belongs to
    /// - `tile` - Tile code
    /// - `now` - Current time
    ///
    /// # Returns
    /// - `Ok(ClaimToggle)` - The claim was taken or released
    /// - `Err(AppError::PlannerErr)` - The toggle was rejected, nothing changed
    /// - `Err(AppError)` - Database or tile list error
    pub async fn switch_tile_claim(
        &self,
        guild_id: u64,
        member: &GuildMember,
        planner_channel_id: u64,
        tile: &str,
        now: DateTime<Utc>,
    ) -> Result<ClaimToggle, AppError> {
        let planner = self.require_planner(planner_channel_id).await?;
        if let Some(team_role_id) = planner.ping_role_id {
            if !member.has_role(team_role_id) {
                return Err(PlannerError::MissingTeamRole.into());
            }
        }

        let tiles = self.state.banner_tiles(now).await?;
        if !tiles.iter().any(|banner| banner == tile) {
            return Err(PlannerError::TileNotInPlanner(tile.to_string()).into());
        }

        let banners = BannerRepository::new(&self.state.db);
        let status = banners
            .get_tile_status(planner_channel_id, tile, self.event_start(now))
            .await?
            .filter(|status| status.captured_at.is_some())
            .ok_or_else(|| PlannerError::TileNotInPlanner(tile.to_string()))?;

        let toggle = if status.claimed_by == Some(member.user_id) {
            banners.unclaim_tile(planner_channel_id, tile).await?;
            ClaimToggle::Unclaimed(tile.to_string())
        } else if self
            .current_claims(planner_channel_id, member.user_id, now)
            .await?
            .len()
            >= MAX_CLAIMS_PER_USER
        {
            return Err(PlannerError::ClaimLimitReached(MAX_CLAIMS_PER_USER).into());
        } else if status.claimed_by.is_none() {
            if !banners
                .claim_tile(planner_channel_id, tile, member.user_id, now)
                .await?
            {
                return Err(PlannerError::TileAlreadyClaimed(tile.to_string()).into());
            }
            ClaimToggle::Claimed(tile.to_string())
        } else {
            return Err(PlannerError::ClaimedBySomeoneElse(tile.to_string()).into());
        };

        tracing::info!(
            "{} {:?} in planner {}",
            member.user_id,
            toggle,
            planner_channel_id
        );

        log_follow_up(
            "sync tickets role",
            planner_channel_id,
            self.sync_role(guild_id, member, &planner, now).await,
        );
        log_follow_up(
            "send panel",
            planner_channel_id,
            self.send_panel(planner_channel_id, now).await,
        );

        Ok(toggle)
    }

    /// Banners of the current event a member has claimed in a planner.
    ///
    /// Claims left on tiles the team has not captured since the event started are ignored.
    pub async fn current_claims(
        &self,
        planner_channel_id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<PlannedBanner>, AppError> {
        let banners = BannerRepository::new(&self.state.db);
        let claims = banners.get_claims_by(user_id, planner_channel_id).await?;
        if claims.is_empty() {
            return Ok(Vec::new());
        }

        let planned = banners
            .get_planned_banners(GetPlannedBannersParam::new(
                planner_channel_id,
                claims,
                self.event_start(now),
            ))
            .await?;

        Ok(planned
            .into_iter()
            .filter(|banner| banner.claimed_by == Some(user_id))
            .collect())
    }

    /// Hands the captures logged since the last call to `handle_tile_capture`.
    ///
    /// The first call only records where the log ends, so history is never replayed. A
    /// capture that fails is logged and skipped.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of captures handled
    pub async fn process_new_captures(&self, now: DateTime<Utc>) -> Result<usize, AppError> {
        let tickets = TicketRepository::new(&self.state.db);
        let mut cursor = self.state.capture_cursor.lock().await;
        let Some(last_id) = *cursor else {
            *cursor = Some(tickets.latest_capture_id().await?.unwrap_or(0));
            return Ok(0);
        };

        let captures = tickets.get_captures_after(last_id, CAPTURE_BATCH).await?;
        for capture in &captures {
            if let Err(e) = self
                .handle_tile_capture(
                    &capture.tile,
                    capture.claims_channel_id,
                    capture.user_id,
                    true,
                    now,
                )
                .await
            {
                tracing::error!(
                    "Failed to handle capture {} of {} in {}: {}",
                    capture.id,
                    capture.tile,
                    capture.claims_channel_id,
                    e
                );
            }
            *cursor = Some(capture.id);
        }

        Ok(captures.len())
    }

    /// Reacts to a capture, or a reverted capture, logged by the ticket tracker.
    ///
    /// A capture releases the tile's claim. The first capture of a planner with a team role
    /// creates its tickets role, otherwise the capturer's tickets role is re-evaluated.
    /// Banner tiles also refresh the decay watch list and the panel.
    ///
    /// # Arguments
    /// - `tile` - Tile code
    /// - `claims_channel_id` - Ticket tracker channel the capture was logged in
    /// - `user_id` - Member who logged the capture
    /// - `is_capture` - False when a capture was reverted
    /// - `now` - Current time
    pub async fn handle_tile_capture(
        &self,
        tile: &str,
        claims_channel_id: u64,
        user_id: u64,
        is_capture: bool,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let Some(planner) = PlannerRepository::new(&self.state.db)
            .get_linked_to(claims_channel_id)
            .await?
        else {
            return Ok(());
        };

        if is_capture {
            BannerRepository::new(&self.state.db)
                .unclaim_tile(planner.channel_id, tile)
                .await?;
        }

        if let Some(guild_id) = self.guild_of(&planner).await? {
            match (planner.tickets_role_id, planner.ping_role_id) {
                (None, Some(team_role_id)) => {
                    self.create_tickets_role(guild_id, &planner, team_role_id, now)
                        .await?
                }
                (Some(_), _) => self.sync_role_of(guild_id, user_id, &planner, now).await?,
                (None, None) => {}
            }
        }

        let tiles = self.state.banner_tiles(now).await?;
        if tiles.iter().any(|banner| banner == tile) {
            self.refresh_decay_watch(now).await?;
            self.send_panel(planner.channel_id, now).await?;
        }

        Ok(())
    }

    /// Creates the tickets role of a planner and hands it to the team.
    ///
    /// The role is named after the team role. Skipped if the team role no longer exists.
    async fn create_tickets_role(
        &self,
        guild_id: u64,
        planner: &Planner,
        team_role_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let Some(team_role) = self.discord.get_role(guild_id, team_role_id).await? else {
            tracing::warn!(
                "Team role {} of planner {} no longer exists, not creating tickets role",
                team_role_id,
                planner.channel_id
            );
            return Ok(());
        };

        let role = self
            .discord
            .create_role(guild_id, &format!("{} (has tickets)", team_role.name))
            .await?;
        let Some(planner) = PlannerRepository::new(&self.state.db)
            .update_config(UpdatePlannerConfigParam {
                tickets_role_id: Some(role.id),
                ..UpdatePlannerConfigParam::new(planner.channel_id)
            })
            .await?
        else {
            return Ok(());
        };

        tracing::info!(
            "Created tickets role {} for planner {}",
            role.id,
            planner.channel_id
        );

        if planner.claims_channel_id.is_some() {
            self.sync_team_roles(guild_id, &planner, now).await?;
        }

        Ok(())
    }
}
