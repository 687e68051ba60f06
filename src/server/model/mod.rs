//! Domain models and parameter types.
//!
//! Domain models are converted from entity models at the repository boundary, with Discord
//! ids parsed from their stored string form into `u64`.

pub mod banner;
pub mod cog_state;
pub mod discord;
pub mod panel;
pub mod planner;
pub mod ticket;
