//! In-memory Discord transport for service and scheduler tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use serenity::async_trait;

use crate::server::{
    error::transport::TransportError,
    model::{
        discord::{ChannelInfo, ChannelMessage, GuildMember, RoleInfo},
        panel::MessageBlock,
    },
};

use super::DiscordTransport;

/// Mutating call recorded by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send { channel_id: u64, content: String },
    Edit { channel_id: u64, message_id: u64, content: String },
    Delete { channel_id: u64, message_id: u64 },
    AddRole { guild_id: u64, user_id: u64, role_id: u64 },
    RemoveRole { guild_id: u64, user_id: u64, role_id: u64 },
    CreateRole { guild_id: u64, name: String },
}

#[derive(Default)]
struct MockState {
    next_id: u64,
    /// Channel id to guild id.
    channels: HashMap<u64, u64>,
    /// Channel history, oldest first.
    messages: HashMap<u64, Vec<ChannelMessage>>,
    roles: HashMap<u64, Vec<RoleInfo>>,
    members: HashMap<u64, Vec<GuildMember>>,
    forbidden: HashSet<u64>,
    forbidden_guilds: HashSet<u64>,
    calls: Vec<Call>,
}

impl MockState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        900_000 + self.next_id
    }

    fn channel_messages(
        &mut self,
        channel_id: u64,
    ) -> Result<&mut Vec<ChannelMessage>, TransportError> {
        if self.forbidden.contains(&channel_id) {
            return Err(TransportError::Forbidden);
        }
        if !self.channels.contains_key(&channel_id) {
            return Err(TransportError::NotFound);
        }

        Ok(self.messages.entry(channel_id).or_default())
    }

    fn member_mut(
        &mut self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<&mut GuildMember, TransportError> {
        self.members
            .get_mut(&guild_id)
            .and_then(|members| members.iter_mut().find(|m| m.user_id == user_id))
            .ok_or(TransportError::NotFound)
    }
}

/// Transport keeping channels, roles and members in memory.
pub struct MockDiscord {
    pub bot_id: u64,
    state: Mutex<MockState>,
}

impl MockDiscord {
    pub fn new(bot_id: u64) -> Self {
        Self {
            bot_id,
            state: Mutex::new(MockState::default()),
        }
    }

    pub fn add_channel(&self, channel_id: u64, guild_id: u64) {
        let mut state = self.state.lock().unwrap();
        state.channels.insert(channel_id, guild_id);
        state.messages.entry(channel_id).or_default();
    }

    /// Posts a message as another user, without recording a call.
    pub fn post(&self, channel_id: u64, author_id: u64, content: &str) -> u64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state
            .messages
            .entry(channel_id)
            .or_default()
            .push(ChannelMessage {
                id,
                author_id,
                content: content.to_string(),
                view: Default::default(),
            });
        id
    }

    pub fn add_role(&self, guild_id: u64, role_id: u64, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.roles.entry(guild_id).or_default().push(RoleInfo {
            id: role_id,
            name: name.to_string(),
        });
    }

    pub fn add_member(&self, guild_id: u64, user_id: u64, role_ids: &[u64]) {
        let mut state = self.state.lock().unwrap();
        state.members.entry(guild_id).or_default().push(GuildMember {
            user_id,
            role_ids: role_ids.to_vec(),
        });
    }

    /// Makes every message operation in the channel fail with `Forbidden`.
    pub fn forbid(&self, channel_id: u64) {
        self.state.lock().unwrap().forbidden.insert(channel_id);
    }

    /// Makes listing role members of the guild fail with `Forbidden`.
    pub fn forbid_guild(&self, guild_id: u64) {
        self.state.lock().unwrap().forbidden_guilds.insert(guild_id);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Contents of the messages sent to a channel, in order.
    pub fn sent_to(&self, channel_id: u64) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Send {
                    channel_id: ch,
                    content,
                } if ch == channel_id => Some(content),
                _ => None,
            })
            .collect()
    }

    /// Current history of a channel, oldest first.
    pub fn messages(&self, channel_id: u64) -> Vec<ChannelMessage> {
        self.state
            .lock()
            .unwrap()
            .messages
            .get(&channel_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn member_roles(&self, guild_id: u64, user_id: u64) -> Vec<u64> {
        self.state
            .lock()
            .unwrap()
            .member_mut(guild_id, user_id)
            .map(|member| member.role_ids.clone())
            .unwrap_or_default()
    }

    pub fn roles(&self, guild_id: u64) -> Vec<RoleInfo> {
        self.state
            .lock()
            .unwrap()
            .roles
            .get(&guild_id)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl DiscordTransport for MockDiscord {
    async fn current_user_id(&self) -> Result<u64, TransportError> {
        Ok(self.bot_id)
    }

    async fn fetch_channel(&self, channel_id: u64) -> Result<ChannelInfo, TransportError> {
        let state = self.state.lock().unwrap();

        state
            .channels
            .get(&channel_id)
            .map(|guild_id| ChannelInfo {
                id: channel_id,
                guild_id: Some(*guild_id),
            })
            .ok_or(TransportError::NotFound)
    }

    async fn recent_messages(
        &self,
        channel_id: u64,
        limit: u8,
    ) -> Result<Vec<ChannelMessage>, TransportError> {
        let mut state = self.state.lock().unwrap();
        let messages = state.channel_messages(channel_id)?;

        Ok(messages
            .iter()
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn send_message(
        &self,
        channel_id: u64,
        block: &MessageBlock,
    ) -> Result<ChannelMessage, TransportError> {
        let mut state = self.state.lock().unwrap();
        state.channel_messages(channel_id)?;

        let message = ChannelMessage {
            id: state.next_id(),
            author_id: self.bot_id,
            content: block.content.clone(),
            view: block.view.signature(),
        };
        state.channel_messages(channel_id)?.push(message.clone());
        state.calls.push(Call::Send {
            channel_id,
            content: block.content.clone(),
        });

        Ok(message)
    }

    async fn edit_message(
        &self,
        channel_id: u64,
        message_id: u64,
        block: &MessageBlock,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        let message = state
            .channel_messages(channel_id)?
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or(TransportError::NotFound)?;

        message.content = block.content.clone();
        message.view = block.view.signature();
        state.calls.push(Call::Edit {
            channel_id,
            message_id,
            content: block.content.clone(),
        });

        Ok(())
    }

    async fn delete_message(
        &self,
        channel_id: u64,
        message_id: u64,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        let messages = state.channel_messages(channel_id)?;
        let before = messages.len();
        messages.retain(|m| m.id != message_id);
        if messages.len() == before {
            return Err(TransportError::NotFound);
        }

        state.calls.push(Call::Delete {
            channel_id,
            message_id,
        });

        Ok(())
    }

    async fn get_role(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<Option<RoleInfo>, TransportError> {
        let state = self.state.lock().unwrap();

        Ok(state
            .roles
            .get(&guild_id)
            .and_then(|roles| roles.iter().find(|role| role.id == role_id).cloned()))
    }

    async fn role_members(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> Result<Vec<GuildMember>, TransportError> {
        let state = self.state.lock().unwrap();
        if state.forbidden_guilds.contains(&guild_id) {
            return Err(TransportError::Forbidden);
        }

        Ok(state
            .members
            .get(&guild_id)
            .map(|members| {
                members
                    .iter()
                    .filter(|member| member.has_role(role_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn get_member(
        &self,
        guild_id: u64,
        user_id: u64,
    ) -> Result<GuildMember, TransportError> {
        let mut state = self.state.lock().unwrap();

        state.member_mut(guild_id, user_id).map(|member| member.clone())
    }

    async fn add_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        let member = state.member_mut(guild_id, user_id)?;
        if !member.has_role(role_id) {
            member.role_ids.push(role_id);
        }
        state.calls.push(Call::AddRole {
            guild_id,
            user_id,
            role_id,
        });

        Ok(())
    }

    async fn remove_member_role(
        &self,
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    ) -> Result<(), TransportError> {
        let mut state = self.state.lock().unwrap();
        let member = state.member_mut(guild_id, user_id)?;
        member.role_ids.retain(|id| *id != role_id);
        state.calls.push(Call::RemoveRole {
            guild_id,
            user_id,
            role_id,
        });

        Ok(())
    }

    async fn create_role(&self, guild_id: u64, name: &str) -> Result<RoleInfo, TransportError> {
        let mut state = self.state.lock().unwrap();
        let role = RoleInfo {
            id: state.next_id(),
            name: name.to_string(),
        };
        state.roles.entry(guild_id).or_default().push(role.clone());
        state.calls.push(Call::CreateRole {
            guild_id,
            name: name.to_string(),
        });

        Ok(role)
    }
}
