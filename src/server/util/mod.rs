//! Pure helpers shared across the planner: id parsing, the event calendar, the
//! single-value cache and the banner tile list loader.

pub mod cache;
pub mod parse;
pub mod period;
pub mod tiles;
