//! Ready event handler.
//!
//! Fired once per gateway connection after the initial handshake.

use serenity::all::{ActivityData, Command, Context, Ready};

use super::interaction::planner_command;

/// Handles the ready event when the bot connects to Discord.
///
/// Sets the activity and registers the planner command globally. Registering again on a
/// reconnect overwrites the same command.
///
/// # Arguments
/// - `ctx` - Discord context for setting activity status
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    ctx.set_activity(Some(ActivityData::watching("the banners")));

    if let Err(e) = Command::set_global_commands(&ctx.http, vec![planner_command()]).await {
        tracing::error!("Failed to register the planner command: {:?}", e);
    }
}
