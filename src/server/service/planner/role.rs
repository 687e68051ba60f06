//! "Has tickets" role policy.
//!
//! Members of a planner's team hold the tickets role while they can still capture today.
//! Captures made today and claimed banners expiring today both count against the daily
//! allowance.

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;

use crate::server::{
    data::{planner::PlannerRepository, ticket::TicketRepository},
    error::AppError,
    model::{
        discord::GuildMember,
        planner::{DeletePlannerConfigParam, Planner},
    },
};

use super::PlannerService;

/// Tickets a member can spend per CT day.
pub const DAILY_TICKETS: u64 = 4;

/// Last day index of an event, later days reuse the last bucket.
const LAST_DAY_INDEX: i64 = 6;

/// Decides whether a member still has tickets left today.
///
/// # Arguments
/// - `tickets_used_today` - Captures made during today's CT day
/// - `claims_expiring_today` - Claimed banners that expire during today's CT day
pub fn has_tickets(tickets_used_today: u64, claims_expiring_today: u64) -> bool {
    tickets_used_today + claims_expiring_today < DAILY_TICKETS
}

impl<'a> PlannerService<'a> {
    /// Adds or removes a member's tickets role based on today's usage.
    ///
    /// Does nothing when the planner has no tickets role. A tickets role deleted from the
    /// guild is cleared from the configuration instead.
    ///
    /// # Arguments
    /// - `guild_id` - Guild of the planner
    /// - `member` - Member to evaluate, with their current roles
    /// - `planner` - Planner the role belongs to
    /// - `now` - Current time
    pub async fn sync_role(
        &self,
        guild_id: u64,
        member: &GuildMember,
        planner: &Planner,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let Some(tickets_role_id) = planner.tickets_role_id else {
            return Ok(());
        };

        if self.discord.get_role(guild_id, tickets_role_id).await?.is_none() {
            tracing::warn!(
                "Tickets role {} of planner {} no longer exists, clearing it",
                tickets_role_id,
                planner.channel_id
            );
            PlannerRepository::new(&self.state.db)
                .delete_config(DeletePlannerConfigParam {
                    tickets_role: true,
                    ..DeletePlannerConfigParam::new(planner.channel_id)
                })
                .await?;
            return Ok(());
        }

        let (start, _) = self.state.calendar.period_for_time(now);
        let today = self.state.calendar.day_within_period(now);
        let day_index = (today - 1).clamp(0, LAST_DAY_INDEX);
        let day_start = start + Duration::days(day_index);

        let tickets_used = match planner.claims_channel_id {
            Some(claims_channel_id) => {
                TicketRepository::new(&self.state.db)
                    .count_captures_between(
                        member.user_id,
                        claims_channel_id,
                        day_start,
                        day_start + Duration::days(1),
                    )
                    .await?
            }
            None => 0,
        };

        let claims_expiring = self
            .current_claims(planner.channel_id, member.user_id, now)
            .await?
            .iter()
            .filter(|banner| self.state.calendar.day_within_period(banner.expires_at()) == today)
            .count() as u64;

        let should_have = has_tickets(tickets_used, claims_expiring);
        let has = member.has_role(tickets_role_id);

        if has && !should_have {
            self.discord
                .remove_member_role(guild_id, member.user_id, tickets_role_id)
                .await?;
            tracing::debug!(
                "Removed tickets role from {} in planner {}",
                member.user_id,
                planner.channel_id
            );
        } else if !has && should_have {
            self.discord
                .add_member_role(guild_id, member.user_id, tickets_role_id)
                .await?;
            tracing::debug!(
                "Added tickets role to {} in planner {}",
                member.user_id,
                planner.channel_id
            );
        }

        Ok(())
    }

    /// Fetches a member by id and syncs their tickets role.
    ///
    /// Members who left the guild are skipped.
    pub async fn sync_role_of(
        &self,
        guild_id: u64,
        user_id: u64,
        planner: &Planner,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let member = match self.discord.get_member(guild_id, user_id).await {
            Ok(member) => member,
            Err(e) => {
                let e = AppError::from(e);
                if e.is_not_found() {
                    tracing::debug!("Member {} is no longer in guild {}", user_id, guild_id);
                    return Ok(());
                }
                return Err(e);
            }
        };

        self.sync_role(guild_id, &member, planner, now).await
    }

    /// Syncs the tickets role of every member of a planner's team, concurrently.
    ///
    /// Individual failures are logged and do not stop the other members.
    pub async fn sync_team_roles(
        &self,
        guild_id: u64,
        planner: &Planner,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let Some(team_role_id) = planner.ping_role_id else {
            return Ok(());
        };

        let members = self.discord.role_members(guild_id, team_role_id).await?;
        let results = join_all(
            members
                .iter()
                .map(|member| self.sync_role(guild_id, member, planner, now)),
        )
        .await;

        for (member, result) in members.iter().zip(results) {
            if let Err(e) = result {
                tracing::error!(
                    "Failed to sync tickets role of {} in planner {}: {}",
                    member.user_id,
                    planner.channel_id,
                    e
                );
            }
        }

        Ok(())
    }

    /// Re-evaluates the tickets role of every team member of every planner.
    ///
    /// Planners whose channel is gone or without a team role are skipped. A planner that
    /// fails is logged and the others are still reassigned.
    pub async fn reassign_all(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        let planners = PlannerRepository::new(&self.state.db).get_all(false).await?;

        for planner in planners {
            if planner.ping_role_id.is_none() {
                continue;
            }
            if let Err(e) = self.reassign_planner(&planner, now).await {
                tracing::error!(
                    "Failed to reassign tickets roles of planner {}: {}",
                    planner.channel_id,
                    e
                );
            }
        }

        Ok(())
    }

    async fn reassign_planner(&self, planner: &Planner, now: DateTime<Utc>) -> Result<(), AppError> {
        let Some(guild_id) = self.guild_of(planner).await? else {
            tracing::debug!(
                "Skipping role reassignment of planner {}, channel not found",
                planner.channel_id
            );
            return Ok(());
        };

        self.sync_team_roles(guild_id, planner, now).await
    }
}
