//! Planner panel rendering and sync.
//!
//! A panel is at least four messages: the control panel with the admin view, a separator,
//! and the tile table split across as many messages as needed. Each table message carries
//! the claim buttons of its own rows and the last one also carries the refresh button.

use chrono::{DateTime, Duration, Utc};

use crate::server::{
    data::{banner::BannerRepository, planner::PlannerRepository},
    error::AppError,
    model::{
        banner::{GetPlannedBannersParam, PlannedBanner},
        panel::{AdminView, MessageBlock, PanelView, UserView, MAX_TILE_BUTTONS},
        planner::Planner,
    },
    service::message_sync::reconcile,
};

use super::PlannerService;

pub const PLANNER_HR: &str = "```\n \n```";
const TABLE_HEADER: &str = "# Tiles & Expiration\n——————- + -——————————————\n";
const TABLE_EMPTY: &str = "*No banners captured yet.*";
const BLANK: &str = "\u{200b}";
const MAX_MESSAGE_LEN: usize = 2000;
const MIN_BLOCKS: usize = 4;
/// Foreign messages tolerated under a panel before it is resent.
const PANEL_TOLERANCE: usize = 10;

pub fn refresh_interval() -> Duration {
    Duration::hours(1)
}

/// Urgency marker of a row in the tile table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryMarker {
    /// Expires during the last 12 hours of the event, recapturing it is wasted.
    DontRecapture,
    Stale,
    /// Expires after the next daily reset.
    AfterReset,
    Within2h,
    Within3h,
    Later,
}

impl ExpiryMarker {
    pub fn classify(
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
        period: (DateTime<Utc>, DateTime<Utc>),
    ) -> Self {
        let (start, end) = period;
        let next_reset = start + Duration::days((now - start).num_days() + 1);

        if expires_at >= end - Duration::hours(12) {
            ExpiryMarker::DontRecapture
        } else if expires_at < now {
            ExpiryMarker::Stale
        } else if now < next_reset && next_reset <= expires_at {
            ExpiryMarker::AfterReset
        } else if expires_at - now < Duration::hours(2) {
            ExpiryMarker::Within2h
        } else if expires_at - now < Duration::hours(3) {
            ExpiryMarker::Within3h
        } else {
            ExpiryMarker::Later
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ExpiryMarker::DontRecapture => "⛔",
            ExpiryMarker::Stale => "🔴",
            ExpiryMarker::AfterReset => "⏩",
            ExpiryMarker::Within2h => "🟠",
            ExpiryMarker::Within3h => "🟡",
            ExpiryMarker::Later => "🟢",
        }
    }

    /// Explanation shown under the table when the marker is used.
    fn legend(&self) -> Option<&'static str> {
        match self {
            ExpiryMarker::DontRecapture => Some("Should __not__ be refreshed"),
            ExpiryMarker::AfterReset => Some("Expires after reset"),
            _ => None,
        }
    }
}

fn control_panel(planner: &Planner) -> String {
    let status = if planner.ping_channel_id.is_none() {
        "⚠️ CONFIGURATION UNFINISHED *(won't work)*"
    } else if planner.is_active {
        "🟢 ONLINE"
    } else {
        "🔴 OFFLINE *(won't ping)*"
    };

    let claims_channel = match planner.claims_channel_id {
        Some(id) => format!("<#{}>", id),
        None => "⚠️ None *(members will have to register captures manually)*".to_string(),
    };
    let ping_channel = match planner.ping_channel_id {
        Some(id) => format!("<#{}>", id),
        None => "⚠️ None *(the bot will not ping at all)*".to_string(),
    };
    let team_role = match (planner.ping_role_id, planner.tickets_role_id) {
        (Some(role), Some(tickets_role)) => format!(
            "<@&{}>\n - Team Role (with tickets): <@&{}>",
            role, tickets_role
        ),
        (Some(role), None) => format!("<@&{}>", role),
        (None, _) => {
            "⚠️ None *(anyone can claim tiles & will ping `@here` instead)*".to_string()
        }
    };

    format!(
        "# Control Panel\n- Status: {}\n- Tile Claim Channel: {}\n- Ping Channel: {}\n- Team Role: {}\n*To configure, use the **Configure** button below*",
        status, claims_channel, ping_channel, team_role
    )
}

fn table_row(banner: &PlannedBanner, marker: ExpiryMarker) -> String {
    let expires_at = banner.expires_at().timestamp();
    let time = if marker == ExpiryMarker::Stale {
        format!("⚠️ **__STALE SINCE <t:{}:R>__** ⚠️\n", expires_at)
    } else {
        let claimer = banner
            .claimed_by
            .map(|id| format!("   →  <@{}>", id))
            .unwrap_or_default();
        format!("<t:{0}:T> (<t:{0}:R>){1}\n", expires_at, claimer)
    };

    format!("{} `{}`  |  {}", marker.emoji(), banner.tile, time)
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Renders the full panel of a planner.
///
/// # Arguments
/// - `planner` - Planner configuration
/// - `banners` - Planned banners, in table order
/// - `now` - Current time
/// - `period` - Current event `(start, end)`
///
/// # Returns
/// - `Vec<MessageBlock>` - At least four blocks, oldest first
pub fn render_panel(
    planner: &Planner,
    banners: &[PlannedBanner],
    now: DateTime<Utc>,
    period: (DateTime<Utc>, DateTime<Utc>),
) -> Vec<MessageBlock> {
    let mut blocks = vec![
        MessageBlock::with_view(
            control_panel(planner),
            PanelView::Admin(AdminView {
                planner_channel_id: planner.channel_id,
                is_active: planner.is_active,
            }),
        ),
        MessageBlock::text(PLANNER_HR),
    ];

    let claim_block = |table: String, tiles: Vec<(String, bool)>, refresh: bool| {
        MessageBlock::with_view(
            table,
            PanelView::User(UserView {
                planner_channel_id: planner.channel_id,
                tiles,
                refresh,
            }),
        )
    };

    let mut table = TABLE_HEADER.to_string();
    let mut legends: Vec<ExpiryMarker> = Vec::new();
    let mut claims: Vec<(String, bool)> = Vec::new();
    let mut listed = 0;

    for banner in banners {
        if banner.expires_at() > period.1 {
            continue;
        }

        let marker = ExpiryMarker::classify(banner.expires_at(), now, period);
        if marker.legend().is_some() && !legends.contains(&marker) {
            legends.push(marker);
        }

        let row = table_row(banner, marker);
        if char_len(&row) + char_len(&table) > MAX_MESSAGE_LEN || claims.len() == MAX_TILE_BUTTONS
        {
            blocks.push(claim_block(
                std::mem::take(&mut table),
                std::mem::take(&mut claims),
                false,
            ));
        }
        table.push_str(&row);
        claims.push((banner.tile.clone(), banner.claimed_by.is_some()));
        listed += 1;
    }

    // Legend lines keep a fixed order regardless of which marker came first
    legends.sort_by_key(|marker| match marker {
        ExpiryMarker::DontRecapture => 0,
        _ => 1,
    });
    let mut legend = "\n".to_string();
    for marker in &legends {
        if let Some(text) = marker.legend() {
            legend.push_str(&format!("\nⓘ {} *{}*", marker.emoji(), text));
        }
    }
    if !legends.is_empty() {
        if char_len(&table) + char_len(&legend) > MAX_MESSAGE_LEN {
            blocks.push(claim_block(
                std::mem::take(&mut table),
                std::mem::take(&mut claims),
                false,
            ));
            table = format!("{}{}", BLANK, legend);
        } else {
            table.push_str(&legend);
        }
    }

    if listed == 0 {
        table = TABLE_EMPTY.to_string();
    }

    blocks.push(claim_block(table, claims, true));

    while blocks.len() < MIN_BLOCKS {
        blocks.insert(2, MessageBlock::text(PLANNER_HR));
    }

    blocks
}

impl<'a> PlannerService<'a> {
    /// Builds the panel of a planner from storage.
    ///
    /// # Returns
    /// - `Ok(Vec<MessageBlock>)` - Panel blocks, empty if the channel is not a planner
    /// - `Err(AppError)` - Database error or unreadable tile list
    pub async fn get_planner_msg(
        &self,
        planner_channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Vec<MessageBlock>, AppError> {
        let Some(planner) = PlannerRepository::new(&self.state.db)
            .get_by_channel_id(planner_channel_id)
            .await?
        else {
            return Ok(Vec::new());
        };

        let period = self.state.calendar.period_for_time(now);
        let tiles = self.state.banner_tiles(now).await?;
        let banners = BannerRepository::new(&self.state.db)
            .get_planned_banners(GetPlannedBannersParam::new(
                planner_channel_id,
                tiles,
                period.0,
            ))
            .await?;

        Ok(render_panel(&planner, &banners, now, period))
    }

    /// Regenerates a planner's panel and syncs it into its channel.
    ///
    /// A planner whose channel no longer exists is removed. Missing permissions are
    /// skipped until the next refresh.
    ///
    /// # Returns
    /// - `Ok(())` - Panel synced, skipped, or planner removed
    /// - `Err(AppError)` - Database error or unexpected transport failure
    pub async fn send_panel(
        &self,
        planner_channel_id: u64,
        now: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if let Err(e) = self.discord.fetch_channel(planner_channel_id).await {
            let e = AppError::from(e);
            if !e.is_not_found() {
                return Err(e);
            }

            tracing::warn!(
                "Planner channel {} no longer exists, removing planner",
                planner_channel_id
            );
            PlannerRepository::new(&self.state.db)
                .delete(planner_channel_id)
                .await?;
            self.state.forget_planner(planner_channel_id).await;

            return Ok(());
        }

        let blocks = self.get_planner_msg(planner_channel_id, now).await?;
        if blocks.is_empty() {
            return Ok(());
        }

        self.state
            .schedule_refresh(planner_channel_id, now + refresh_interval())
            .await;

        let bot_id = self.state.bot_user_id(self.discord).await?;
        match reconcile(
            self.discord,
            bot_id,
            planner_channel_id,
            &blocks,
            PANEL_TOLERANCE,
            true,
        )
        .await
        {
            Ok(outcome) => {
                tracing::debug!("Synced planner {} panel: {:?}", planner_channel_id, outcome);
            }
            Err(e) if e.is_forbidden() => {
                tracing::debug!(
                    "Missing permissions to update planner {} panel",
                    planner_channel_id
                );
            }
            Err(e) => return Err(e),
        }

        Ok(())
    }
}
