//! Error types for the planner bot.
//!
//! `AppError` is the top-level error type that wraps domain-specific errors. Repositories
//! return `DbErr`, services return `AppError`, and scheduler jobs log and swallow errors
//! per tick so a failing check never stops the scheduler.

pub mod config;
pub mod internal;
pub mod planner;
pub mod transport;

use thiserror::Error;

use crate::server::error::{
    config::ConfigError, internal::InternalError, planner::PlannerError,
    transport::TransportError,
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most variants
/// use `#[from]` for automatic error conversion.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord client error from Serenity.
    ///
    /// Boxed due to large size. Only raised while building or running the gateway client;
    /// REST calls made through the transport are classified into `TransportErr`.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Failed to read the banner tile list from disk.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Failed to encode or decode JSON (tile list, scheduler checkpoint).
    #[error(transparent)]
    JsonErr(#[from] serde_json::Error),

    /// Discord REST operation failed.
    #[error(transparent)]
    TransportErr(#[from] TransportError),

    /// A user-facing planner operation was rejected.
    ///
    /// The message is meant to be shown to the user who triggered the operation.
    #[error(transparent)]
    PlannerErr(#[from] PlannerError),

    /// Unexpected internal failure, indicating a possible bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// Returns true when the error is a Discord "not found" response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::TransportErr(TransportError::NotFound))
    }

    /// Returns true when the error is a Discord "missing permissions" response.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, AppError::TransportErr(TransportError::Forbidden))
    }
}
