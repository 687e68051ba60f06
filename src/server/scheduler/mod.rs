//! Cron jobs driving the planner.
//!
//! - `planner` - Reminder, decay, panel refresh and daily reset checks

pub mod planner;
