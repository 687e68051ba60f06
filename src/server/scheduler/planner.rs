use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    model::banner::PlannedBanner,
    service::{
        discord::DiscordTransport,
        planner::{ping::ReminderWindow, PlannerService},
    },
    state::PlannerState,
};

/// Last day of an event on which tickets roles are reassigned.
const LAST_EVENT_DAY: i64 = 7;

/// Starts the planner scheduler
///
/// Registers five checks that interleave freely:
/// - Reminders every 10 seconds
/// - Decay pings every 5 seconds
/// - Panel refreshes every 30 seconds
/// - Daily reset every minute
/// - New ticket tracker captures every 5 seconds
///
/// # Arguments
/// - `state`: Shared planner state
/// - `discord`: Transport used by every check
///
/// # Returns
/// - `Ok(JobScheduler)`: The running scheduler, to be shut down on exit
/// - `Err(AppError)`: A job could not be registered or the scheduler failed to start
pub async fn start_scheduler(
    state: Arc<PlannerState>,
    discord: Arc<dyn DiscordTransport>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_state = state.clone();
    let job_discord = discord.clone();
    let reminders = Job::new_async("*/10 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let discord = job_discord.clone();

        Box::pin(async move {
            if let Err(e) = check_reminders(&state, discord.as_ref(), Utc::now()).await {
                tracing::error!("Error checking planner reminders: {}", e);
            }
        })
    })?;

    let job_state = state.clone();
    let job_discord = discord.clone();
    let decay = Job::new_async("*/5 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let discord = job_discord.clone();

        Box::pin(async move {
            if let Err(e) = check_decay(&state, discord.as_ref(), Utc::now()).await {
                tracing::error!("Error checking banner decay: {}", e);
            }
        })
    })?;

    let job_state = state.clone();
    let job_discord = discord.clone();
    let refresh = Job::new_async("*/30 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let discord = job_discord.clone();

        Box::pin(async move {
            if let Err(e) = check_refresh(&state, discord.as_ref(), Utc::now()).await {
                tracing::error!("Error refreshing planner panels: {}", e);
            }
        })
    })?;

    let job_state = state.clone();
    let job_discord = discord.clone();
    let reset = Job::new_async("0 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let discord = job_discord.clone();

        Box::pin(async move {
            if let Err(e) = check_reset(&state, discord.as_ref(), Utc::now()).await {
                tracing::error!("Error checking daily reset: {}", e);
            }
        })
    })?;

    let job_state = state.clone();
    let job_discord = discord.clone();
    let captures = Job::new_async("*/5 * * * * *", move |_uuid, _lock| {
        let state = job_state.clone();
        let discord = job_discord.clone();

        Box::pin(async move {
            if let Err(e) = check_captures(&state, discord.as_ref(), Utc::now()).await {
                tracing::error!("Error reading new captures: {}", e);
            }
        })
    })?;

    scheduler.add(reminders).await?;
    scheduler.add(decay).await?;
    scheduler.add(refresh).await?;
    scheduler.add(reset).await?;
    scheduler.add(captures).await?;
    scheduler.start().await?;

    tracing::info!("Planner scheduler started");

    Ok(scheduler)
}

/// Sends the reminders due at `now` and checkpoints the cursor.
///
/// No-op before the next sweep and during the final stretch of the event.
pub async fn check_reminders(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let Ok(_guard) = state.reminder_guard.try_lock() else {
        tracing::debug!("Reminder check still running, skipping tick");
        return Ok(());
    };

    let blackout_start = state.blackout_start(now);

    let window = {
        let mut cursor = state.cursor.lock().await;
        if now < cursor.next_check || now >= blackout_start {
            return Ok(());
        }
        cursor.advance(now, &state.settings)
    };
    let window = ReminderWindow {
        check_to: window.check_to.min(blackout_start),
        ..window
    };

    let sent = PlannerService::new(state, discord)
        .send_reminders(window, now)
        .await?;
    tracing::debug!(
        "Reminder sweep [{}, {}) sent {} reminders",
        window.check_from,
        window.check_to,
        sent
    );

    state.save_checkpoint(now).await
}

/// Pings every watched banner that went stale and reloads the watch list.
pub async fn check_decay(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let Ok(_guard) = state.decay_guard.try_lock() else {
        tracing::debug!("Decay check still running, skipping tick");
        return Ok(());
    };

    if now >= state.blackout_start(now) {
        return Ok(());
    }

    let decayed: Vec<PlannedBanner> = state
        .decay_watch
        .lock()
        .await
        .iter()
        .filter(|banner| banner.expires_at() < now)
        .cloned()
        .collect();
    if decayed.is_empty() {
        return Ok(());
    }

    // Banners that went stale before this event started belong to a finished event.
    let event_start = state.event_start(now);
    let service = PlannerService::new(state, discord);
    for banner in decayed.iter().filter(|b| b.expires_at() >= event_start) {
        if let Err(e) = service.ping_decay(banner, now).await {
            tracing::error!(
                "Failed to ping decay of {} in planner {}: {}",
                banner.tile,
                banner.planner_channel_id,
                e
            );
        }
    }

    service.refresh_decay_watch(now).await
}

/// Regenerates every panel whose refresh deadline has passed.
pub async fn check_refresh(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let Ok(_guard) = state.refresh_guard.try_lock() else {
        tracing::debug!("Refresh check still running, skipping tick");
        return Ok(());
    };

    let due: Vec<u64> = state
        .refreshes
        .lock()
        .await
        .iter()
        .filter(|(_, at)| **at <= now)
        .map(|(channel_id, _)| *channel_id)
        .collect();

    let service = PlannerService::new(state, discord);
    for channel_id in due {
        if let Err(e) = service.send_panel(channel_id, now).await {
            tracing::error!("Failed to refresh planner {}: {}", channel_id, e);
        }
    }

    Ok(())
}

/// Reassigns tickets roles when a new CT day starts.
pub async fn check_reset(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let Ok(_guard) = state.reset_guard.try_lock() else {
        tracing::debug!("Reset check still running, skipping tick");
        return Ok(());
    };

    let day = state.calendar.day_within_period(now);
    {
        let mut ct_day = state.ct_day.lock().await;
        if *ct_day == day {
            return Ok(());
        }
        *ct_day = day;
    }

    tracing::info!("CT day {} started", day);
    if day <= LAST_EVENT_DAY {
        PlannerService::new(state, discord).reassign_all(now).await?;
    }

    Ok(())
}

/// Reacts to the captures the ticket tracker logged since the last tick.
pub async fn check_captures(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    now: DateTime<Utc>,
) -> Result<(), AppError> {
    let Ok(_guard) = state.capture_guard.try_lock() else {
        tracing::debug!("Capture check still running, skipping tick");
        return Ok(());
    };

    let handled = PlannerService::new(state, discord)
        .process_new_captures(now)
        .await?;
    if handled > 0 {
        tracing::debug!("Handled {} new captures", handled);
    }

    Ok(())
}
