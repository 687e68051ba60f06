//! SeaORM entities for the planner database.

pub mod prelude;

pub mod claim_channel;
pub mod cog_state;
pub mod planner;
pub mod planner_tile_claim;
pub mod tile_capture;
