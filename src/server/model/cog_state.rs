//! Domain model for persisted subsystem checkpoints.

use chrono::{DateTime, Utc};

/// JSON blob saved by a subsystem under its name.
#[derive(Debug, Clone, PartialEq)]
pub struct CogState {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub data: String,
}

impl CogState {
    pub fn from_entity(entity: entity::cog_state::Model) -> Self {
        Self {
            name: entity.name,
            saved_at: entity.saved_at,
            data: entity.data,
        }
    }
}
