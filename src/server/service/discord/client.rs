//! Serenity implementation of the Discord transport.

use std::sync::Arc;

use serenity::{
    all::{
        ActionRowComponent, ButtonKind, ButtonStyle, Channel, ChannelId, CreateActionRow,
        CreateButton, CreateMessage, EditMessage, EditRole, GetMessages, GuildId, Member,
        Message, MessageId, Role, RoleId, UserId,
    },
    async_trait,
    http::Http,
};

use crate::server::{
    error::transport::TransportError,
    model::{
        discord::{ChannelInfo, ChannelMessage, GuildMember, RoleInfo},
        panel::{ButtonSignature, ButtonTone, MessageBlock, ViewSignature},
    },
};

use super::DiscordTransport;

/// Maximum number of members returned per request by Discord API
const MEMBERS_PER_REQUEST: u64 = 1000;

/// Transport backed by the bot's REST client.
pub struct SerenityTransport {
    http: Arc<Http>,
}

impl SerenityTransport {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }

    /// Fetches every member of a guild, one page at a time.
    async fn all_members(&self, guild_id: GuildId) -> Result<Vec<Member>, TransportError> {
        let mut all_members = Vec::new();
        let mut after: Option<u64> = None;

        loop {
            let members = self
                .http
                .get_guild_members(guild_id, Some(MEMBERS_PER_REQUEST), after)
                .await?;

            let fetched_count = members.len();
            after = members.last().map(|m| m.user.id.get());
            all_members.extend(members);

            if fetched_count < MEMBERS_PER_REQUEST as usize {
                break;
            }
        }

        Ok(all_members)
    }
}

#[async_trait]
impl DiscordTransport for SerenityTransport {
    async fn current_user_id(&self) -> Result<u64, TransportError> {
        let user = self.http.get_current_user().await?;

        Ok(user.id.get())
    }

    async fn fetch_channel(&self, channel_id: u64) -> Result<ChannelInfo, TransportError> {
        let channel = self.http.get_channel(ChannelId::new(channel_id)).await?;

        let guild_id = match channel {
            Channel::Guild(channel) => Some(channel.guild_id.get()),
            _ => None,
        };

        Ok(ChannelInfo {
            id: channel_id,
            guild_id,
        })
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, TransportError> {
        let messages = ChannelId::new(channel_id)
            .messages(&self.http, GetMessages::new().limit(limit))
            .await?;

        Ok(messages.iter().map(channel_message_from).collect())
    }

    async fn send_message(
        &self,
        channel_id: u64,
        block: &MessageBlock,
    ) -> Result<ChannelMessage, TransportError> {
        let message = CreateMessage::new()
            .content(block.content.clone())
            .components(action_rows(&block.view.signature()));

        let sent = ChannelId::new(channel_id)
            .send_message(&self.http, message)
            .await?;

        Ok(channel_message_from(&sent))
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        block: &MessageBlock,
    ) -> Result<(), TransportError> {
        let edit_message = EditMessage::new()
            .content(block.content.clone())
            .components(action_rows(&block.view.signature()));

        self.http
            .edit_message(
                ChannelId::new(channel_id),
                MessageId::new(message_id),
                &edit_message,
                vec![],
            )
            .await?;

        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<(), TransportError> {
        self.http
            .delete_message(ChannelId::new(channel_id), MessageId::new(message_id), None)
            .await?;

        Ok(())
    }

    async fn get_role(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<Option<RoleInfo>, TransportError> {
        let roles = self.http.get_guild_roles(GuildId::new(guild_id)).await?;

        Ok(roles
            .into_iter()
            .find(|role| role.id.get() == role_id)
            .map(|role| role_info_from(&role)))
    }

    async fn role_members(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<Vec<GuildMember>, TransportError> {
        let role_id = RoleId::new(role_id);
        let members = self.all_members(GuildId::new(guild_id)).await?;

        Ok(members
            .iter()
            .filter(|member| member.roles.contains(&role_id))
            .map(guild_member_from)
            .collect())
    }

    async fn get_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<GuildMember, TransportError> {
        let member = self
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await?;

        Ok(guild_member_from(&member))
    }

    async fn add_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), TransportError> {
        self.http
            .add_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await?;

        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), TransportError> {
        self.http
            .remove_member_role(
                GuildId::new(guild_id),
                UserId::new(user_id),
                RoleId::new(role_id),
                None,
            )
            .await?;

        Ok(())
    }

    async fn create_role(&self, guild_id: u64, name: &str) -> Result<RoleInfo, TransportError> {
        let role = GuildId::new(guild_id)
            .create_role(&self.http, EditRole::new().name(name).mentionable(true))
            .await?;

        Ok(role_info_from(&role))
    }
}

fn action_rows(signature: &ViewSignature) -> Vec<CreateActionRow> {
    signature
        .rows
        .iter()
        .filter(|row| !row.is_empty())
        .map(|row| {
            CreateActionRow::Buttons(
                row.iter()
                    .map(|button| {
                        CreateButton::new(button.custom_id.clone())
                            .label(button.label.clone())
                            .style(button_style(button.tone))
                            .disabled(button.disabled)
                    })
                    .collect(),
            )
        })
        .collect()
}

fn button_style(tone: ButtonTone) -> ButtonStyle {
    match tone {
        ButtonTone::Primary => ButtonStyle::Primary,
        ButtonTone::Secondary => ButtonStyle::Secondary,
        ButtonTone::Success => ButtonStyle::Success,
        ButtonTone::Danger => ButtonStyle::Danger,
    }
}

fn button_tone(style: ButtonStyle) -> ButtonTone {
    match style {
        ButtonStyle::Primary => ButtonTone::Primary,
        ButtonStyle::Success => ButtonTone::Success,
        ButtonStyle::Danger => ButtonTone::Danger,
        _ => ButtonTone::Secondary,
    }
}

/// Reads a message back into the comparable form used by the reconciler.
///
/// Link buttons and other components have no custom id and are ignored.
pub fn channel_message_from(message: &Message) -> ChannelMessage {
    let rows = message
        .components
        .iter()
        .map(|row| {
            row.components
                .iter()
                .filter_map(|component| match component {
                    ActionRowComponent::Button(button) => match &button.data {
                        ButtonKind::NonLink { custom_id, style } => Some(ButtonSignature {
                            custom_id: custom_id.clone(),
                            label: button.label.clone().unwrap_or_default(),
                            tone: button_tone(*style),
                            disabled: button.disabled,
                        }),
                        _ => None,
                    },
                    _ => None,
                })
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    ChannelMessage {
        id: message.id.get(),
        author_id: message.author.id.get(),
        content: message.content.clone(),
        view: ViewSignature { rows },
    }
}

fn role_info_from(role: &Role) -> RoleInfo {
    RoleInfo {
        id: role.id.get(),
        name: role.name.clone(),
    }
}

pub fn guild_member_from(member: &Member) -> GuildMember {
    GuildMember {
        user_id: member.user.id.get(),
        role_ids: member.roles.iter().map(|role| role.get()).collect(),
    }
}
