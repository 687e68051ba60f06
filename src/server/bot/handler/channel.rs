//! Channel event handlers.
//!
//! A planner whose channel is deleted is removed, so the scheduler stops refreshing and
//! pinging for it.

use serenity::all::{Context, GuildChannel, Message};

use crate::server::{
    error::{planner::PlannerError, AppError},
    service::{
        discord::{client::SerenityTransport, DiscordTransport},
        planner::PlannerService,
    },
    state::PlannerState,
};

/// Handles the channel_delete event when a channel is deleted from a guild.
///
/// # Arguments
/// - `state` - Shared planner state
/// - `ctx` - Discord context providing the HTTP client
/// - `channel` - The deleted guild channel from Discord
/// - `_messages` - Messages that were in the channel if available (unused)
pub async fn handle_channel_delete(
    state: &PlannerState,
    ctx: Context,
    channel: GuildChannel,
    _messages: Option<Vec<Message>>,
) {
    let transport = SerenityTransport::new(ctx.http.clone());

    if let Err(e) = remove_deleted_planner(state, &transport, channel.id.get()).await {
        tracing::error!(
            "Failed to remove planner of deleted channel {} in guild {}: {:?}",
            channel.id,
            channel.guild_id,
            e
        );
    }
}

/// Removes the planner bound to a deleted channel, if any.
///
/// # Returns
/// - `Ok(true)` - A planner was removed
/// - `Ok(false)` - The channel was not a planner
/// - `Err(AppError)` - Database error during removal
pub async fn remove_deleted_planner(
    state: &PlannerState,
    discord: &dyn DiscordTransport,
    channel_id: u64,
) -> Result<bool, AppError> {
    match PlannerService::new(state, discord)
        .remove_planner(channel_id)
        .await
    {
        Ok(()) => Ok(true),
        Err(AppError::PlannerErr(PlannerError::NotAPlanner)) => Ok(false),
        Err(e) => Err(e),
    }
}
