//! Checkpoint store for subsystem state.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::cog_state::CogState;

/// Repository for the JSON checkpoints subsystems save under their name.
pub struct CogStateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CogStateRepository<'a> {
    /// Creates a new CogStateRepository instance.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the checkpoint saved under `name`.
    ///
    /// # Returns
    /// - `Ok(Some(CogState))` - Checkpoint found
    /// - `Ok(None)` - Nothing was ever saved under this name
    /// - `Err(DbErr)` - Database error during query
    pub async fn get(&self, name: &str) -> Result<Option<CogState>, DbErr> {
        let entity = self.find_entity(name).await?;

        Ok(entity.map(CogState::from_entity))
    }

    /// Saves a checkpoint, replacing the previous one with the same name.
    ///
    /// # Arguments
    /// - `name` - Subsystem name
    /// - `data` - Serialized state
    /// - `saved_at` - Time of the save, compared against on reload
    ///
    /// # Returns
    /// - `Ok(CogState)` - The stored checkpoint
    /// - `Err(DbErr)` - Database error during upsert
    pub async fn save(
        &self,
        name: &str,
        data: String,
        saved_at: DateTime<Utc>,
    ) -> Result<CogState, DbErr> {
        let entity = match self.find_entity(name).await? {
            Some(existing) => {
                let mut active: entity::cog_state::ActiveModel = existing.into();
                active.saved_at = ActiveValue::Set(saved_at);
                active.data = ActiveValue::Set(data);
                active.update(self.db).await?
            }
            None => {
                entity::cog_state::ActiveModel {
                    id: ActiveValue::NotSet,
                    name: ActiveValue::Set(name.to_string()),
                    saved_at: ActiveValue::Set(saved_at),
                    data: ActiveValue::Set(data),
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(CogState::from_entity(entity))
    }

    async fn find_entity(&self, name: &str) -> Result<Option<entity::cog_state::Model>, DbErr> {
        entity::prelude::CogState::find()
            .filter(entity::cog_state::Column::Name.eq(name))
            .one(self.db)
            .await
    }
}
