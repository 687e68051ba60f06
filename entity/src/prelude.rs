pub use super::claim_channel::Entity as ClaimChannel;
pub use super::cog_state::Entity as CogState;
pub use super::planner::Entity as Planner;
pub use super::planner_tile_claim::Entity as PlannerTileClaim;
pub use super::tile_capture::Entity as TileCapture;
