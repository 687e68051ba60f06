//! Planner service: panels, claims, reminders and the "has tickets" role.
//!
//! The service is built per call from the shared `PlannerState` and a Discord transport.
//! It is organized into separate modules by concern:
//! - `panel` - Control panel and tile table rendering, panel sync
//! - `claim` - Claim toggling, capture bridge, decay watch
//! - `admin` - Planner administration and admin tile operations
//! - `ping` - Reminder and decay ping messages
//! - `role` - "Has tickets" role policy

pub mod admin;
pub mod claim;
pub mod panel;
pub mod ping;
pub mod role;

#[cfg(test)]
mod test;

use chrono::{DateTime, Utc};

use crate::server::{
    data::{banner::BannerRepository, planner::PlannerRepository},
    error::{planner::PlannerError, AppError},
    model::planner::Planner,
    service::discord::DiscordTransport,
    state::PlannerState,
};

/// Maximum number of claims a member can hold in one planner.
pub const MAX_CLAIMS_PER_USER: usize = 4;

/// Number of upcoming expirations kept in the decay watch list.
pub const DECAY_WATCH_SIZE: usize = 25;

/// Service providing planner operations.
///
/// Holds references to the shared planner state and the Discord transport. Repositories are
/// created per call from the state's database connection.
pub struct PlannerService<'a> {
    state: &'a PlannerState,
    discord: &'a dyn DiscordTransport,
}

impl<'a> PlannerService<'a> {
    /// Creates a new PlannerService instance.
    ///
    /// # Arguments
    /// - `state` - Shared planner state
    /// - `discord` - Transport used for every Discord operation
    ///
    /// # Returns
    /// - `PlannerService` - New service instance
    pub fn new(state: &'a PlannerState, discord: &'a dyn DiscordTransport) -> Self {
        Self { state, discord }
    }

    /// Start of the event running at `now`.
    fn event_start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.state.event_start(now)
    }

    /// Gets a planner or rejects the operation.
    ///
    /// # Returns
    /// - `Ok(Planner)` - Channel is a planner
    /// - `Err(AppError::PlannerErr(NotAPlanner))` - Channel is not a planner
    /// - `Err(AppError::DbErr)` - Database error
    async fn require_planner(&self, planner_channel_id: u64) -> Result<Planner, AppError> {
        PlannerRepository::new(&self.state.db)
            .get_by_channel_id(planner_channel_id)
            .await?
            .ok_or_else(|| PlannerError::NotAPlanner.into())
    }

    /// Guild a planner channel belongs to.
    ///
    /// # Returns
    /// - `Ok(Some(guild_id))` - Channel exists in a guild
    /// - `Ok(None)` - Channel no longer exists or is not in a guild
    /// - `Err(AppError)` - Any other transport failure
    async fn guild_of(&self, planner: &Planner) -> Result<Option<u64>, AppError> {
        match self.discord.fetch_channel(planner.channel_id).await {
            Ok(channel) => Ok(channel.guild_id),
            Err(e) => {
                let e = AppError::from(e);
                if e.is_not_found() {
                    Ok(None)
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Recomputes the decay watch list from storage.
    ///
    /// The list holds the soonest future expirations across all active planners. Any banner
    /// left out expires no earlier than every listed one, so recomputing whenever a listed
    /// banner decays is enough to never miss one.
    pub async fn refresh_decay_watch(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        let tiles = self.state.banner_tiles(now).await?;
        let watch = BannerRepository::new(&self.state.db)
            .get_closest_to_expire(&tiles, now, self.event_start(now), DECAY_WATCH_SIZE)
            .await?;

        tracing::debug!("Watching {} banners for decay", watch.len());
        *self.state.decay_watch.lock().await = watch;

        Ok(())
    }

    /// Prepares the in-memory schedules after startup.
    ///
    /// Every planner gets its panel refreshed at the next full hour, the decay watch list
    /// is loaded and the capture log position is recorded.
    pub async fn initialize(&self, now: DateTime<Utc>) -> Result<(), AppError> {
        let planners = PlannerRepository::new(&self.state.db).get_all(false).await?;
        let next_hour = next_full_hour(now);

        {
            let mut refreshes = self.state.refreshes.lock().await;
            for planner in &planners {
                refreshes.insert(planner.channel_id, next_hour);
            }
        }

        self.refresh_decay_watch(now).await?;
        self.process_new_captures(now).await?;

        tracing::info!(
            "Planner initialized with {} planners, first refresh at {}",
            planners.len(),
            next_hour
        );

        Ok(())
    }
}

/// Start of the hour after `now`.
fn next_full_hour(now: DateTime<Utc>) -> DateTime<Utc> {
    let floored = now.timestamp().div_euclid(3600) * 3600;
    DateTime::<Utc>::from_timestamp(floored, 0).unwrap_or(now) + chrono::Duration::hours(1)
}
