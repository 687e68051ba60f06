use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlannerTileClaim::Table)
                    .if_not_exists()
                    .col(pk_auto(PlannerTileClaim::Id))
                    .col(string(PlannerTileClaim::PlannerChannelId))
                    .col(string(PlannerTileClaim::Tile))
                    .col(string_null(PlannerTileClaim::ClaimedBy))
                    .col(timestamp_null(PlannerTileClaim::ClaimedAt))
                    .to_owned(),
            )
            .await?;

        // One claim record per tile per planner
        manager
            .create_index(
                Index::create()
                    .name("idx_planner_tile_claim_planner_tile")
                    .table(PlannerTileClaim::Table)
                    .col(PlannerTileClaim::PlannerChannelId)
                    .col(PlannerTileClaim::Tile)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_planner_tile_claim_planner_tile")
                    .table(PlannerTileClaim::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PlannerTileClaim::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PlannerTileClaim {
    Table,
    Id,
    PlannerChannelId,
    Tile,
    ClaimedBy,
    ClaimedAt,
}
