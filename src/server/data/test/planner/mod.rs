use crate::server::{
    data::planner::PlannerRepository,
    model::planner::{DeletePlannerConfigParam, UpdatePlannerConfigParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod delete_config;
mod get_all;
mod get_by_channel_id;
mod get_linked_to;
mod update_config;
