//! Discord objects as seen through the messaging transport.

use crate::server::model::panel::ViewSignature;

/// Message read from a channel's history.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelMessage {
    pub id: u64,
    pub author_id: u64,
    pub content: String,
    /// Buttons attached to the message.
    pub view: ViewSignature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelInfo {
    pub id: u64,
    /// `None` for DM channels.
    pub guild_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildMember {
    pub user_id: u64,
    pub role_ids: Vec<u64>,
}

impl GuildMember {
    pub fn has_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleInfo {
    pub id: u64,
    pub name: String,
}
