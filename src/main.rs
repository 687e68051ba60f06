mod server;

use std::sync::Arc;

use chrono::Utc;
use tracing_subscriber::EnvFilter;

use crate::server::{
    bot,
    config::Config,
    error::AppError,
    scheduler::planner::start_scheduler,
    service::{
        discord::{client::SerenityTransport, DiscordTransport},
        planner::PlannerService,
    },
    startup,
    state::PlannerState,
    util::period::EventCalendar,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    let state = Arc::new(PlannerState::new(
        db,
        config.planner.clone(),
        EventCalendar::default(),
        Utc::now(),
    ));
    state.load_checkpoint().await?;

    tracing::info!("Starting planner");

    let bot_client = bot::start::init_bot(&config, state.clone()).await?;
    let discord: Arc<dyn DiscordTransport> =
        Arc::new(SerenityTransport::new(bot_client.http.clone()));

    PlannerService::new(&state, discord.as_ref())
        .initialize(Utc::now())
        .await?;

    // Start Discord bot in a separate task
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(bot_client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let mut scheduler = start_scheduler(state, discord).await?;

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down planner");
    scheduler.shutdown().await?;

    Ok(())
}
