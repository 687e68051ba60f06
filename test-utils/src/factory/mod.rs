//! Factory methods for creating test data.
//!
//! Each planner table has its own factory module with a `Factory` struct for customization
//! and a `create_*` convenience function for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let planner = factory::planner::create_planner(&db).await?;
//!     let capture = factory::tile_capture::TileCaptureFactory::new(&db, "111", "222")
//!         .tile("MRX")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `planner` - Create planner entities
//! - `claim_channel` - Create tracked claim channel entities
//! - `tile_capture` - Create tile capture (ticket log) entities
//! - `tile_claim` - Create planner tile claim entities

pub mod claim_channel;
pub mod helpers;
pub mod planner;
pub mod tile_capture;
pub mod tile_claim;
