//! Service layer for business logic and orchestration.
//!
//! Services sit between the bot and scheduler on one side and the data layer and Discord
//! transport on the other:
//!
//! - `discord` - Transport trait over the Discord API, with the serenity implementation
//! - `message_sync` - Keeps a channel's bot messages in sync with a list of blocks
//! - `planner` - Panels, claims, pings and tickets roles

pub mod discord;
pub mod message_sync;
pub mod planner;
