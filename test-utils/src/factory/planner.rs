//! Planner factory for creating test planner entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test planners with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::planner::PlannerFactory;
///
/// let planner = PlannerFactory::new(&db)
///     .ping_channel_id(Some("555".to_string()))
///     .ping_role_id(Some("666".to_string()))
///     .build()
///     .await?;
/// ```
pub struct PlannerFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: String,
    claims_channel_id: Option<String>,
    ping_channel_id: Option<String>,
    ping_role_id: Option<String>,
    tickets_role_id: Option<String>,
    is_active: bool,
}

impl<'a> PlannerFactory<'a> {
    /// Creates a new PlannerFactory with default values.
    ///
    /// Defaults:
    /// - channel_id: unique auto-incremented id
    /// - every optional configuration field: `None`
    /// - is_active: `true`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `PlannerFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            channel_id: (1_000_000 + next_id()).to_string(),
            claims_channel_id: None,
            ping_channel_id: None,
            ping_role_id: None,
            tickets_role_id: None,
            is_active: true,
        }
    }

    /// Sets the planner channel id.
    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Sets the linked claims channel id.
    pub fn claims_channel_id(mut self, claims_channel_id: Option<String>) -> Self {
        self.claims_channel_id = claims_channel_id;
        self
    }

    /// Sets the channel reminders are pinged in.
    pub fn ping_channel_id(mut self, ping_channel_id: Option<String>) -> Self {
        self.ping_channel_id = ping_channel_id;
        self
    }

    /// Sets the team role id.
    pub fn ping_role_id(mut self, ping_role_id: Option<String>) -> Self {
        self.ping_role_id = ping_role_id;
        self
    }

    /// Sets the "has tickets" role id.
    pub fn tickets_role_id(mut self, tickets_role_id: Option<String>) -> Self {
        self.tickets_role_id = tickets_role_id;
        self
    }

    /// Sets whether the planner is active.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Builds and inserts the planner entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::planner::Model)` - Created planner entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::planner::Model, DbErr> {
        entity::planner::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(self.channel_id),
            claims_channel_id: ActiveValue::Set(self.claims_channel_id),
            ping_channel_id: ActiveValue::Set(self.ping_channel_id),
            ping_role_id: ActiveValue::Set(self.ping_role_id),
            tickets_role_id: ActiveValue::Set(self.tickets_role_id),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active planner with no configuration.
///
/// Shorthand for `PlannerFactory::new(db).build().await`.
pub async fn create_planner(db: &DatabaseConnection) -> Result<entity::planner::Model, DbErr> {
    PlannerFactory::new(db).build().await
}
