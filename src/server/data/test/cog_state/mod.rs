use crate::server::data::cog_state::CogStateRepository;
use chrono::{Duration, TimeZone, Utc};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod get;
mod save;
