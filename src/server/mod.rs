//! Planner backend: Discord bot, scheduler and the business logic behind them.
//!
//! # Architecture
//!
//! The server follows a layered architecture with clear separation of concerns:
//!
//! - **Bot Layer** (`bot/`) - Gateway event handlers answering panel buttons
//! - **Scheduler** (`scheduler/`) - Cron jobs sending reminders, decay pings and refreshes
//! - **Service Layer** (`service/`) - Business logic and the Discord transport seam
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared planner state (DB, schedules, caches, job guards)
//! - **Startup** (`startup`) - Database connection and migrations
//! - **Utilities** (`util/`) - Event calendar, cache, id parsing and tile list loading

pub mod bot;
pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
