//! Reminder and decay pings.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::server::{
    data::{banner::BannerRepository, planner::PlannerRepository},
    error::AppError,
    model::{
        banner::{ClaimedStatus, GetPlannedBannersParam, PlannedBanner},
        panel::MessageBlock,
        planner::{DeletePlannerConfigParam, Planner},
    },
};

use super::PlannerService;

/// Tiles to remind about, by claimant. `None` collects the unclaimed tiles.
pub type ReminderGroups = BTreeMap<Option<u64>, BTreeSet<String>>;

/// Expiration windows covered by one reminder sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    pub check_from: DateTime<Utc>,
    /// End of the claimed-banner window.
    pub check_to: DateTime<Utc>,
    /// End of the unclaimed-banner window, `None` when that sweep is not due.
    pub check_to_unclaimed: Option<DateTime<Utc>>,
}

/// Mention used for tiles nobody claimed.
pub fn group_mention(planner: &Planner) -> String {
    match planner.group_role_id() {
        Some(role_id) => format!("<@&{}>", role_id),
        None => "@here".to_string(),
    }
}

/// Formats tile codes as "`A`, `B` and `C`".
fn join_tiles<'t>(tiles: impl IntoIterator<Item = &'t String>) -> String {
    let tiles: Vec<String> = tiles.into_iter().map(|tile| format!("`{}`", tile)).collect();
    match tiles.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

/// Builds the reminder message of a planner.
///
/// # Returns
/// - `Some(String)` - Message mentioning every claimant, then the group for unclaimed tiles
/// - `None` - Nothing to remind about
pub fn reminder_message(groups: &ReminderGroups, group_mention: &str) -> Option<String> {
    let mut message = "**Tiles that will expire soon:**\n".to_string();
    let mut pinged_someone = false;

    for (user_id, tiles) in groups {
        let Some(user_id) = user_id else {
            continue;
        };
        if tiles.is_empty() {
            continue;
        }
        pinged_someone = true;
        message.push_str(&format!("- <@{}>: {}.\n", user_id, join_tiles(tiles)));
    }

    match groups.get(&None).filter(|tiles| !tiles.is_empty()) {
        Some(unclaimed) => {
            let notice = format!(
                "{} these tiles haven't been claimed and will expire somewhat soon: {}.",
                group_mention,
                join_tiles(unclaimed)
            );
            if pinged_someone {
                message.push_str(&format!("Also, {}", notice));
            } else {
                message = notice;
            }
        }
        None if !pinged_someone => return None,
        None => {}
    }

    Some(message)
}

/// Builds the message sent when a banner goes stale.
///
/// Mentions the claimant, else the group role, else `@here`.
pub fn decay_message(tile: &str, claimed_by: Option<u64>, group_role_id: Option<u64>) -> String {
    let mention = match (claimed_by, group_role_id) {
        (Some(user_id), _) => format!("<@{}>", user_id),
        (None, Some(role_id)) => format!("<@&{}>", role_id),
        (None, None) => "@here".to_string(),
    };

    format!(
        "**BANNER `{}` HAS JUST GONE STALE**, claim it now {}!",
        tile, mention
    )
}

impl<'a> PlannerService<'a> {
    /// Collects the reminder groups of one planner.
    ///
    /// Claimed banners expiring in the claimed window are grouped by claimant. Unclaimed
    /// banners expiring in the unclaimed window, if due, go under `None`.
    pub async fn collect_reminders(
        &self,
        planner: &Planner,
        tiles: &[String],
        window: ReminderWindow,
        now: DateTime<Utc>,
    ) -> Result<ReminderGroups, AppError> {
        let banners = BannerRepository::new(&self.state.db);
        let since = self.event_start(now);
        let mut groups = ReminderGroups::new();

        if window.check_from < window.check_to {
            let claimed = banners
                .get_planned_banners(
                    GetPlannedBannersParam::new(planner.channel_id, tiles.to_vec(), since)
                        .expiring_between(window.check_from, window.check_to)
                        .with_status(ClaimedStatus::Claimed),
                )
                .await?;
            for banner in claimed {
                groups
                    .entry(banner.claimed_by)
                    .or_default()
                    .insert(banner.tile);
            }
        }

        if let Some(check_to_unclaimed) = window.check_to_unclaimed {
            let unclaimed = banners
                .get_planned_banners(
                    GetPlannedBannersParam::new(planner.channel_id, tiles.to_vec(), since)
                        .expiring_between(window.check_from, check_to_unclaimed)
                        .with_status(ClaimedStatus::Unclaimed),
                )
                .await?;
            for banner in unclaimed {
                groups.entry(None).or_default().insert(banner.tile);
            }
        }

        Ok(groups)
    }

    /// Sends one reminder per active planner with a ping channel.
    ///
    /// A failing planner is logged and does not stop the others.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of reminders sent
    /// - `Err(AppError)` - Planners or tile list could not be loaded
    pub async fn send_reminders(
        &self,
        window: ReminderWindow,
        now: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let tiles = self.state.banner_tiles(now).await?;
        let planners = PlannerRepository::new(&self.state.db).get_all(true).await?;
        let mut sent = 0;

        for planner in planners {
            if planner.ping_channel_id.is_none() {
                continue;
            }

            match self.remind_planner(&planner, &tiles, window, now).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(e) => tracing::error!(
                    "Failed to send reminder for planner {}: {}",
                    planner.channel_id,
                    e
                ),
            }
        }

        Ok(sent)
    }

    async fn remind_planner(
        &self,
        planner: &Planner,
        tiles: &[String],
        window: ReminderWindow,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let groups = self.collect_reminders(planner, tiles, window, now).await?;
        match reminder_message(&groups, &group_mention(planner)) {
            Some(message) => self.send_ping(planner, message, now).await,
            None => Ok(false),
        }
    }

    /// Pings a planner's team about a banner that just went stale.
    ///
    /// Skipped if the planner is gone, inactive or has no ping channel. Also skipped when the
    /// banner went stale outside the pingable part of the current event (before it started
    /// or in its final hours) and when the tile is no longer captured or was recaptured.
    pub async fn ping_decay(
        &self,
        banner: &PlannedBanner,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let event_start = self.event_start(now);
        let expires_at = banner.expires_at();
        if expires_at < event_start || expires_at >= self.state.blackout_start(now) {
            tracing::debug!(
                "Not pinging decay of {} in planner {}, it expired at {} outside the event",
                banner.tile,
                banner.planner_channel_id,
                expires_at
            );
            return Ok(false);
        }

        let Some(planner) = PlannerRepository::new(&self.state.db)
            .get_by_channel_id(banner.planner_channel_id)
            .await?
        else {
            return Ok(false);
        };
        if !planner.is_active || planner.ping_channel_id.is_none() {
            return Ok(false);
        }

        let Some(status) = BannerRepository::new(&self.state.db)
            .get_tile_status(planner.channel_id, &banner.tile, event_start)
            .await?
        else {
            return Ok(false);
        };
        match status.expires_at() {
            Some(status_expires_at) if status_expires_at <= now => {}
            _ => return Ok(false),
        }

        let message = decay_message(&banner.tile, status.claimed_by, planner.group_role_id());
        self.send_ping(&planner, message, now).await
    }

    /// Sends a message to a planner's ping channel.
    ///
    /// A ping channel that no longer exists is cleared from the configuration and the panel
    /// is resent to show it.
    ///
    /// # Returns
    /// - `Ok(true)` - Message sent
    /// - `Ok(false)` - No ping channel, or it was just cleared
    async fn send_ping(
        &self,
        planner: &Planner,
        content: String,
        now: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let Some(ping_channel_id) = planner.ping_channel_id else {
            return Ok(false);
        };

        match self
            .discord
            .send_message(ping_channel_id, &MessageBlock::text(content))
            .await
        {
            Ok(_) => {
                tracing::info!(
                    "Sent ping for planner {} in {}",
                    planner.channel_id,
                    ping_channel_id
                );
                Ok(true)
            }
            Err(e) => {
                let e = AppError::from(e);
                if !e.is_not_found() {
                    return Err(e);
                }

                tracing::warn!(
                    "Ping channel {} of planner {} no longer exists, clearing it",
                    ping_channel_id,
                    planner.channel_id
                );
                PlannerRepository::new(&self.state.db)
                    .delete_config(DeletePlannerConfigParam {
                        ping_channel: true,
                        ..DeletePlannerConfigParam::new(planner.channel_id)
                    })
                    .await?;
                self.send_panel(planner.channel_id, now).await?;

                Ok(false)
            }
        }
    }
}
