//! Tile capture factory for creating ticket log entries.
//!
//! Captures are written by the ticket tracker in production; tests use this factory to seed
//! the planned banners a planner displays.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test tile captures with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::tile_capture::TileCaptureFactory;
///
/// let capture = TileCaptureFactory::new(&db, &claim_channel.channel_id, "42")
///     .tile("MRX")
///     .captured_at(Utc::now() - Duration::hours(20))
///     .build()
///     .await?;
/// ```
pub struct TileCaptureFactory<'a> {
    db: &'a DatabaseConnection,
    claims_channel_id: String,
    user_id: String,
    tile: String,
    captured_at: DateTime<Utc>,
}

impl<'a> TileCaptureFactory<'a> {
    /// Creates a new TileCaptureFactory with default values.
    ///
    /// Defaults:
    /// - tile: `"AAA"`
    /// - captured_at: now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `claims_channel_id` - Channel the capture was logged in
    /// - `user_id` - Discord id of the capturing user
    ///
    /// # Returns
    /// - `TileCaptureFactory` - New factory instance with defaults
    pub fn new(
        db: &'a DatabaseConnection,
        claims_channel_id: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            db,
            claims_channel_id: claims_channel_id.into(),
            user_id: user_id.into(),
            tile: "AAA".to_string(),
            captured_at: Utc::now(),
        }
    }

    /// Sets the captured tile code.
    pub fn tile(mut self, tile: impl Into<String>) -> Self {
        self.tile = tile.into();
        self
    }

    /// Sets the capture time.
    pub fn captured_at(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = captured_at;
        self
    }

    /// Builds and inserts the capture entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::tile_capture::Model)` - Created capture entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::tile_capture::Model, DbErr> {
        entity::tile_capture::ActiveModel {
            id: ActiveValue::NotSet,
            claims_channel_id: ActiveValue::Set(self.claims_channel_id),
            user_id: ActiveValue::Set(self.user_id),
            tile: ActiveValue::Set(self.tile),
            captured_at: ActiveValue::Set(self.captured_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a capture of `tile` at `captured_at`.
///
/// Shorthand for the factory with the tile and time set.
pub async fn create_capture(
    db: &DatabaseConnection,
    claims_channel_id: &str,
    user_id: &str,
    tile: &str,
    captured_at: DateTime<Utc>,
) -> Result<entity::tile_capture::Model, DbErr> {
    TileCaptureFactory::new(db, claims_channel_id, user_id)
        .tile(tile)
        .captured_at(captured_at)
        .build()
        .await
}
