//! Planner data repository for database operations.
//!
//! Provides the `PlannerRepository` for creating, configuring and removing planner channels.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder,
};

use crate::server::model::planner::{
    DeletePlannerConfigParam, Planner, UpdatePlannerConfigParam,
};

/// Repository providing database operations for planner management.
pub struct PlannerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PlannerRepository<'a> {
    /// Creates a new PlannerRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `PlannerRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the planner kept in a channel.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID of the planner
    ///
    /// # Returns
    /// - `Ok(Some(Planner))` - Channel is a planner
    /// - `Ok(None)` - Channel is not a planner
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_by_channel_id(&self, channel_id: u64) -> Result<Option<Planner>, DbErr> {
        let entity = self.find_entity(channel_id).await?;

        entity.map(Planner::from_entity).transpose()
    }

    /// Gets every planner, optionally only the active ones.
    ///
    /// # Arguments
    /// - `only_active` - Skip planners whose pings are turned off
    ///
    /// # Returns
    /// - `Ok(Vec<Planner>)` - Planners in creation order
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_all(&self, only_active: bool) -> Result<Vec<Planner>, DbErr> {
        let mut query = entity::prelude::Planner::find();
        if only_active {
            query = query.filter(entity::planner::Column::IsActive.eq(true));
        }

        query
            .order_by_asc(entity::planner::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Planner::from_entity)
            .collect()
    }

    /// Gets the planner reading captures from a claims channel.
    ///
    /// # Arguments
    /// - `claims_channel_id` - Discord channel ID tracked by the ticket tracker
    ///
    /// # Returns
    /// - `Ok(Some(Planner))` - Planner linked to the channel
    /// - `Ok(None)` - No planner reads from this channel
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_linked_to(&self, claims_channel_id: u64) -> Result<Option<Planner>, DbErr> {
        let entity = entity::prelude::Planner::find()
            .filter(entity::planner::Column::ClaimsChannelId.eq(claims_channel_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(Planner::from_entity).transpose()
    }

    /// Creates an active, unconfigured planner.
    ///
    /// # Arguments
    /// - `channel_id` - Discord channel ID the panel will be kept in
    ///
    /// # Returns
    /// - `Ok(Planner)` - The created planner
    /// - `Err(DbErr)` - Database error, including the channel already being a planner
    pub async fn create(&self, channel_id: u64) -> Result<Planner, DbErr> {
        let entity = entity::planner::ActiveModel {
            id: ActiveValue::NotSet,
            channel_id: ActiveValue::Set(channel_id.to_string()),
            claims_channel_id: ActiveValue::Set(None),
            ping_channel_id: ActiveValue::Set(None),
            ping_role_id: ActiveValue::Set(None),
            tickets_role_id: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Planner::from_entity(entity)
    }

    /// Deletes the planner kept in a channel.
    ///
    /// # Returns
    /// - `Ok(true)` - Planner deleted
    /// - `Ok(false)` - Channel was not a planner
    /// - `Err(DbErr)` - Database error during delete
    pub async fn delete(&self, channel_id: u64) -> Result<bool, DbErr> {
        let result = entity::prelude::Planner::delete_many()
            .filter(entity::planner::Column::ChannelId.eq(channel_id.to_string()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Sets configuration fields of a planner.
    ///
    /// Fields left `None` in the parameters keep their stored value.
    ///
    /// # Returns
    /// - `Ok(Some(Planner))` - The updated planner
    /// - `Ok(None)` - Channel is not a planner
    /// - `Err(DbErr)` - Database error during update
    pub async fn update_config(
        &self,
        param: UpdatePlannerConfigParam,
    ) -> Result<Option<Planner>, DbErr> {
        let Some(existing) = self.find_entity(param.channel_id).await? else {
            return Ok(None);
        };

        if param.is_empty() {
            return Planner::from_entity(existing).map(Some);
        }

        let mut active: entity::planner::ActiveModel = existing.into();
        if let Some(id) = param.claims_channel_id {
            active.claims_channel_id = ActiveValue::Set(Some(id.to_string()));
        }
        if let Some(id) = param.ping_channel_id {
            active.ping_channel_id = ActiveValue::Set(Some(id.to_string()));
        }
        if let Some(id) = param.ping_role_id {
            active.ping_role_id = ActiveValue::Set(Some(id.to_string()));
        }
        if let Some(id) = param.tickets_role_id {
            active.tickets_role_id = ActiveValue::Set(Some(id.to_string()));
        }
        if let Some(is_active) = param.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }

        let updated = active.update(self.db).await?;

        Planner::from_entity(updated).map(Some)
    }

    /// Clears configuration fields of a planner.
    ///
    /// # Returns
    /// - `Ok(Some(Planner))` - The updated planner
    /// - `Ok(None)` - Channel is not a planner
    /// - `Err(DbErr)` - Database error during update
    pub async fn delete_config(
        &self,
        param: DeletePlannerConfigParam,
    ) -> Result<Option<Planner>, DbErr> {
        let Some(existing) = self.find_entity(param.channel_id).await? else {
            return Ok(None);
        };

        if !(param.claims_channel || param.ping_channel || param.ping_role || param.tickets_role)
        {
            return Planner::from_entity(existing).map(Some);
        }

        let mut active: entity::planner::ActiveModel = existing.into();
        if param.claims_channel {
            active.claims_channel_id = ActiveValue::Set(None);
        }
        if param.ping_channel {
            active.ping_channel_id = ActiveValue::Set(None);
        }
        if param.ping_role {
            active.ping_role_id = ActiveValue::Set(None);
        }
        if param.tickets_role {
            active.tickets_role_id = ActiveValue::Set(None);
        }

        let updated = active.update(self.db).await?;

        Planner::from_entity(updated).map(Some)
    }

    async fn find_entity(&self, channel_id: u64) -> Result<Option<entity::planner::Model>, DbErr> {
        entity::prelude::Planner::find()
            .filter(entity::planner::Column::ChannelId.eq(channel_id.to_string()))
            .one(self.db)
            .await
    }
}
