//! Discord gateway side of the planner.
//!
//! The bot answers panel buttons, admin forms and the `/planner` command, and cleans up
//! planners whose channel was deleted.
//! Everything else the planner does goes through the REST transport, whose HTTP client is
//! shared with the gateway client so the scheduler does not maintain a second connection.
//!
//! # Gateway Intents
//!
//! The bot requires the `GUILDS` intent to receive channel deletions. Interactions are
//! delivered without any intent.

pub mod handler;
pub mod start;
