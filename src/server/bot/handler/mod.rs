use std::sync::Arc;

use serenity::all::{Context, EventHandler, GuildChannel, Interaction, Message, Ready};
use serenity::async_trait;

use crate::server::state::PlannerState;

pub mod channel;
pub mod interaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    pub state: Arc<PlannerState>,
}

impl Handler {
    pub fn new(state: Arc<PlannerState>) -> Self {
        Self { state }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called when a member uses a panel or the planner command
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.state, ctx, interaction).await;
    }

    /// Called when a channel is deleted from a guild
    async fn channel_delete(
        &self,
        ctx: Context,
        channel: GuildChannel,
        messages: Option<Vec<Message>>,
    ) {
        channel::handle_channel_delete(&self.state, ctx, channel, messages).await;
    }
}
