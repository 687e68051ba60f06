//! Discord transport seam.
//!
//! Planner services talk to Discord only through `DiscordTransport`, so the scheduler and
//! panel logic run unchanged against the in-memory transport used by tests. Every failure
//! is classified into a `TransportError` so callers can self-heal on `NotFound` and skip on
//! `Forbidden`.

pub mod client;

#[cfg(test)]
pub mod mock;

use serenity::async_trait;

use crate::server::{
    error::transport::TransportError,
    model::{
        discord::{ChannelInfo, ChannelMessage, GuildMember, RoleInfo},
        panel::MessageBlock,
    },
};

/// Discord operations used by the planner.
#[async_trait]
pub trait DiscordTransport: Send + Sync {
    /// Id of the bot user.
    async fn current_user_id(&self) -> Result<u64, TransportError>;

    async fn fetch_channel(&self, channel_id: u64) -> Result<ChannelInfo, TransportError>;

    /// Up to `limit` most recent messages of a channel, newest first.
    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, TransportError>;

    async fn send_message(
        &self,
        channel_id: u64,
        block: &MessageBlock,
    ) -> Result<ChannelMessage, TransportError>;

    /// Replaces the text and buttons of a message.
    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        block: &MessageBlock,
    ) -> Result<(), TransportError>;

    async fn delete_message(&self, channel_id: u64, message_id: u64)
        -> Result<(), TransportError>;

    /// Looks a role up in its guild, `None` when it was deleted.
    async fn get_role(&self, guild_id: u64, role_id: u64)
        -> Result<Option<RoleInfo>, TransportError>;

    /// Every member of a guild holding the role.
    async fn role_members(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<Vec<GuildMember>, TransportError>;

    async fn get_member(&self, guild_id: u64, user_id: u64)
        -> Result<GuildMember, TransportError>;

    async fn add_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), TransportError>;

    async fn remove_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), TransportError>;

    /// Creates a mentionable role.
    async fn create_role(&self, guild_id: u64, name: &str) -> Result<RoleInfo, TransportError>;
}
