//! CT Planner Test Utils
//!
//! Shared testing utilities for the planner bot. Provides a builder for test contexts backed by
//! in-memory SQLite databases, factories for planner records, and factories for Serenity objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn test_planner_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_planner_tables().build().await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
