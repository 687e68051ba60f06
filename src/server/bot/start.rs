use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

use crate::server::{
    bot::handler::Handler, config::Config, error::AppError, state::PlannerState,
};

/// Builds the Discord bot client.
///
/// The client's HTTP client is shared with the REST transport used by the scheduler.
///
/// # Arguments
/// - `config` - Application configuration holding the bot token
/// - `state` - Shared planner state handed to the event handler
///
/// # Returns
/// - `Ok(Client)` - Client ready to start
/// - `Err(AppError)` - Client could not be built
pub async fn init_bot(config: &Config, state: Arc<PlannerState>) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS;

    let handler = Handler::new(state);
    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Runs the bot until the gateway connection shuts down.
///
/// Should be spawned on its own task since it only returns on shutdown or failure.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
