pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_planner_table;
mod m20260301_000002_create_claim_channel_table;
mod m20260301_000003_create_tile_capture_table;
mod m20260301_000004_create_planner_tile_claim_table;
mod m20260301_000005_create_cog_state_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_planner_table::Migration),
            Box::new(m20260301_000002_create_claim_channel_table::Migration),
            Box::new(m20260301_000003_create_tile_capture_table::Migration),
            Box::new(m20260301_000004_create_planner_tile_claim_table::Migration),
            Box::new(m20260301_000005_create_cog_state_table::Migration),
        ]
    }
}
