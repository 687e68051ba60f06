//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON, simulating what
//! Discord's API would return. Used to test the conversion from Serenity objects into the
//! transport types the planner works with.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_member, create_test_message, create_test_role};
//!
//! let role = create_test_role(111111111, "Team", 0x00FF00, 1);
//! let member = create_test_member(1, 222222222, &[111111111]);
//! let message = create_test_message(333, 444, 555, "hello");
//! ```
//!
//! # Available Factories
//!
//! - `role::create_test_role` - Create Serenity Role objects
//! - `message::create_test_message` - Create Serenity Message objects
//! - `message::create_test_message_with_buttons` - Create messages carrying button rows
//! - `member::create_test_member` - Create Serenity Member objects

pub mod member;
pub mod message;
pub mod role;

pub use member::create_test_member;
pub use message::{create_test_message, create_test_message_with_buttons};
pub use role::create_test_role;
