use chrono::Duration;

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_BANNER_TILES_PATH: &str = "data/banners.json";
const DEFAULT_CHECK_EVERY_MINUTES: i64 = 30;
const DEFAULT_CHECK_EVERY_UNCLAIMED_MINUTES: i64 = 60;

pub struct Config {
    pub database_url: String,
    pub discord_bot_token: String,

    pub planner: PlannerSettings,
}

/// Tunables of the planner scheduler.
#[derive(Debug, Clone)]
pub struct PlannerSettings {
    /// JSON array of banner tile codes.
    pub banner_tiles_path: String,
    /// Bucket size of the claimed-tile reminder sweep.
    pub check_every: Duration,
    /// Bucket size of the unclaimed-tile reminder sweep.
    pub check_every_unclaimed: Duration,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            banner_tiles_path: DEFAULT_BANNER_TILES_PATH.to_string(),
            check_every: Duration::minutes(DEFAULT_CHECK_EVERY_MINUTES),
            check_every_unclaimed: Duration::minutes(DEFAULT_CHECK_EVERY_UNCLAIMED_MINUTES),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            discord_bot_token: std::env::var("DISCORD_BOT_TOKEN")
                .map_err(|_| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?,
            planner: PlannerSettings {
                banner_tiles_path: std::env::var("BANNER_TILES_PATH")
                    .unwrap_or_else(|_| DEFAULT_BANNER_TILES_PATH.to_string()),
                check_every: minutes_from_env(
                    "PLANNER_CHECK_EVERY_MINUTES",
                    DEFAULT_CHECK_EVERY_MINUTES,
                )?,
                check_every_unclaimed: minutes_from_env(
                    "PLANNER_CHECK_EVERY_UNCLAIMED_MINUTES",
                    DEFAULT_CHECK_EVERY_UNCLAIMED_MINUTES,
                )?,
            },
        })
    }
}

/// Reads a positive number of minutes from an optional environment variable.
fn minutes_from_env(name: &str, default: i64) -> Result<Duration, ConfigError> {
    let Ok(value) = std::env::var(name) else {
        return Ok(Duration::minutes(default));
    };

    parse_minutes(name, &value)
}

fn parse_minutes(name: &str, value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(Duration::minutes(minutes)),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
}
