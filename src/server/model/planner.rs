//! Domain models for planner data operations.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::server::util::parse::{parse_id_column, parse_optional_id_column};

/// Per-channel planner configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Planner {
    /// Unique identifier for the planner record.
    pub id: i32,
    /// Channel the control panel is kept in.
    pub channel_id: u64,
    /// Ticket tracker channel captures are read from.
    pub claims_channel_id: Option<u64>,
    /// Channel reminders and decay pings are sent to.
    pub ping_channel_id: Option<u64>,
    /// Team role. Members need it to claim tiles.
    pub ping_role_id: Option<u64>,
    /// "Has tickets" marker role, created lazily on the first capture.
    pub tickets_role_id: Option<u64>,
    /// Inactive planners never ping.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Planner {
    /// Converts an entity model to a planner domain model at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(Planner)` - The converted planner domain model
    /// - `Err(DbErr::Custom)` - A stored id is not a valid Discord id
    pub fn from_entity(entity: entity::planner::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            channel_id: parse_id_column("channel_id", &entity.channel_id)?,
            claims_channel_id: parse_optional_id_column(
                "claims_channel_id",
                entity.claims_channel_id.as_deref(),
            )?,
            ping_channel_id: parse_optional_id_column(
                "ping_channel_id",
                entity.ping_channel_id.as_deref(),
            )?,
            ping_role_id: parse_optional_id_column("ping_role_id", entity.ping_role_id.as_deref())?,
            tickets_role_id: parse_optional_id_column(
                "tickets_role_id",
                entity.tickets_role_id.as_deref(),
            )?,
            is_active: entity.is_active,
            created_at: entity.created_at,
        })
    }

    /// Role mentioned for unclaimed or stale tiles: the tickets role, else the team role.
    pub fn group_role_id(&self) -> Option<u64> {
        self.tickets_role_id.or(self.ping_role_id)
    }
}

/// Parameters for setting planner configuration fields.
///
/// Only fields set to `Some` are written; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePlannerConfigParam {
    pub channel_id: u64,
    pub claims_channel_id: Option<u64>,
    pub ping_channel_id: Option<u64>,
    pub ping_role_id: Option<u64>,
    pub tickets_role_id: Option<u64>,
    pub is_active: Option<bool>,
}

impl UpdatePlannerConfigParam {
    pub fn new(channel_id: u64) -> Self {
        Self {
            channel_id,
            ..Default::default()
        }
    }

    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.claims_channel_id.is_none()
            && self.ping_channel_id.is_none()
            && self.ping_role_id.is_none()
            && self.tickets_role_id.is_none()
            && self.is_active.is_none()
    }
}

/// Parameters for clearing planner configuration fields.
///
/// Each flag set to `true` clears the matching field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeletePlannerConfigParam {
    pub channel_id: u64,
    pub claims_channel: bool,
    pub ping_channel: bool,
    pub ping_role: bool,
    pub tickets_role: bool,
}

impl DeletePlannerConfigParam {
    pub fn new(channel_id: u64) -> Self {
        Self {
            channel_id,
            ..Default::default()
        }
    }
}
