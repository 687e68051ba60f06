//! Planner state shared by the scheduler jobs and the bot handlers.
//!
//! Everything the planner keeps between ticks lives here behind one `tokio::sync::Mutex`
//! per concern: the reminder cursor, the decay watch list, per-planner refresh deadlines,
//! the banner tile cache, the current CT day and the capture log position. Each scheduler check also owns a guard
//! mutex taken with `try_lock`, so a tick that is still running turns the next one into a
//! no-op. The state is created once at startup and shared through an `Arc`.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OnceCell};

use crate::server::{
    config::PlannerSettings,
    data::cog_state::CogStateRepository,
    error::AppError,
    model::{banner::PlannedBanner, cog_state::CogState},
    service::{discord::DiscordTransport, planner::ping::ReminderWindow},
    util::{cache::Cache, period::EventCalendar, tiles::load_banner_tiles},
};

/// Name the reminder cursor is checkpointed under.
pub const CHECKPOINT_NAME: &str = "planner";

/// How long the banner tile list is cached.
pub fn banner_tiles_ttl() -> Duration {
    Duration::days(5)
}

/// Final stretch of an event during which nothing is pinged.
pub fn blackout() -> Duration {
    Duration::hours(12)
}

/// Watermarks of the reminder sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderCursor {
    /// Start of the next claimed-tile sweep.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub next_check: DateTime<Utc>,
    /// Start of the next unclaimed-tile sweep.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub next_check_unclaimed: DateTime<Utc>,
    /// End of the window covered by the previous sweep, so windows never overlap.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub last_check_end: DateTime<Utc>,
}

impl ReminderCursor {
    /// Cursor whose first sweep is at the next `check_every` boundary after `now`.
    pub fn fresh(now: DateTime<Utc>, settings: &PlannerSettings) -> Self {
        let step = settings.check_every.num_seconds().max(1);
        let floored = now.timestamp().div_euclid(step) * step;
        let next_check = DateTime::<Utc>::from_timestamp(floored, 0).unwrap_or(now)
            + settings.check_every;

        Self {
            next_check,
            next_check_unclaimed: next_check,
            last_check_end: next_check,
        }
    }

    /// Moves the cursor past the sweep due at `now` and returns the windows it covers.
    ///
    /// The claimed window reaches two intervals ahead of `next_check` and starts where the
    /// previous one ended. The unclaimed window is only returned once
    /// `next_check_unclaimed` has passed.
    pub fn advance(&mut self, now: DateTime<Utc>, settings: &PlannerSettings) -> ReminderWindow {
        let check_from = self.next_check.max(self.last_check_end);
        let check_to = self.next_check + settings.check_every * 2;
        let check_to_unclaimed = self.next_check_unclaimed + settings.check_every_unclaimed * 2;

        self.next_check += settings.check_every;
        self.last_check_end = check_to;

        let unclaimed_due = now >= self.next_check_unclaimed;
        if unclaimed_due {
            self.next_check_unclaimed += settings.check_every_unclaimed;
        }

        ReminderWindow {
            check_from,
            check_to,
            check_to_unclaimed: unclaimed_due.then_some(check_to_unclaimed),
        }
    }

    /// Picks the checkpoint over `fresh` unless it is stale or unreadable.
    ///
    /// A checkpoint saved more than one `check_every` before the fresh `next_check` is
    /// discarded.
    pub fn restore(
        fresh: ReminderCursor,
        checkpoint: Option<&CogState>,
        settings: &PlannerSettings,
    ) -> ReminderCursor {
        let Some(checkpoint) = checkpoint else {
            return fresh;
        };

        if fresh.next_check - checkpoint.saved_at > settings.check_every {
            tracing::debug!(
                "Discarding planner checkpoint saved at {}",
                checkpoint.saved_at
            );
            return fresh;
        }

        match serde_json::from_str(&checkpoint.data) {
            Ok(cursor) => cursor,
            Err(e) => {
                tracing::warn!("Failed to decode planner checkpoint: {}", e);
                fresh
            }
        }
    }
}

/// Shared planner context.
pub struct PlannerState {
    pub db: DatabaseConnection,
    pub settings: PlannerSettings,
    pub calendar: EventCalendar,
    banner_tiles: Mutex<Cache<Vec<String>>>,
    bot_user_id: OnceCell<u64>,
    pub cursor: Mutex<ReminderCursor>,
    /// Soonest expirations across all active planners, soonest first.
    pub decay_watch: Mutex<Vec<PlannedBanner>>,
    /// Planner channel id to the time its panel is regenerated next.
    pub refreshes: Mutex<HashMap<u64, DateTime<Utc>>>,
    /// CT day seen by the last reset check, 0 before the first check.
    pub ct_day: Mutex<i64>,
    /// Last capture row handled, `None` until the capture log was first read.
    pub capture_cursor: Mutex<Option<i32>>,
    pub reminder_guard: Mutex<()>,
    pub decay_guard: Mutex<()>,
    pub refresh_guard: Mutex<()>,
    pub reset_guard: Mutex<()>,
    pub capture_guard: Mutex<()>,
}

impl PlannerState {
    pub fn new(
        db: DatabaseConnection,
        settings: PlannerSettings,
        calendar: EventCalendar,
        now: DateTime<Utc>,
    ) -> Self {
        let cursor = ReminderCursor::fresh(now, &settings);

        Self {
            db,
            settings,
            calendar,
            banner_tiles: Mutex::new(Cache::new()),
            bot_user_id: OnceCell::new(),
            cursor: Mutex::new(cursor),
            decay_watch: Mutex::new(Vec::new()),
            refreshes: Mutex::new(HashMap::new()),
            ct_day: Mutex::new(0),
            capture_cursor: Mutex::new(None),
            reminder_guard: Mutex::new(()),
            decay_guard: Mutex::new(()),
            refresh_guard: Mutex::new(()),
            reset_guard: Mutex::new(()),
            capture_guard: Mutex::new(()),
        }
    }

    /// Replaces the tile cache with a list that never expires.
    #[cfg(test)]
    pub fn with_banner_tiles(mut self, tiles: &[&str]) -> Self {
        let tiles = tiles.iter().map(|tile| tile.to_string()).collect();
        self.banner_tiles = Mutex::new(Cache::pinned(tiles));
        self
    }

    /// Banner tile codes, reloaded from disk every few days.
    pub async fn banner_tiles(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let path = self.settings.banner_tiles_path.clone();
        let mut cache = self.banner_tiles.lock().await;

        cache
            .get_or_try_recompute(now, banner_tiles_ttl(), || load_banner_tiles(path))
            .await
    }

    /// Id of the bot user, fetched once.
    pub async fn bot_user_id(&self, discord: &dyn DiscordTransport) -> Result<u64, AppError> {
        let id = self
            .bot_user_id
            .get_or_try_init(|| async { discord.current_user_id().await })
            .await?;

        Ok(*id)
    }

    /// Restores the reminder cursor from the last checkpoint, if still usable.
    pub async fn load_checkpoint(&self) -> Result<(), AppError> {
        let checkpoint = CogStateRepository::new(&self.db)
            .get(CHECKPOINT_NAME)
            .await?;

        let mut cursor = self.cursor.lock().await;
        *cursor = ReminderCursor::restore(*cursor, checkpoint.as_ref(), &self.settings);

        Ok(())
    }

    pub async fn save_checkpoint(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        let data = {
            let cursor = self.cursor.lock().await;
            serde_json::to_string(&*cursor)?
        };

        CogStateRepository::new(&self.db)
            .save(CHECKPOINT_NAME, data, now)
            .await?;

        Ok(())
    }

    /// Start of the event running at `now`.
    pub fn event_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.calendar.period_for_time(now).0
    }

    /// Moment pings stop for the event running at `now`.
    pub fn blackout_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.calendar.period_for_time(now).1 - blackout()
    }

    pub async fn schedule_refresh(&self, planner_channel_id: u64, at: DateTime<Utc>) {
        self.refreshes.lock().await.insert(planner_channel_id, at);
    }

    /// Stops refreshing a removed planner.
    pub async fn forget_planner(&self, planner_channel_id: u64) {
        self.refreshes.lock().await.remove(&planner_channel_id);
        self.decay_watch
            .lock()
            .await
            .retain(|banner| banner.planner_channel_id != planner_channel_id);
    }
}
