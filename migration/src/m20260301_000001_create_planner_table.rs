use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Planner::Table)
                    .if_not_exists()
                    .col(pk_auto(Planner::Id))
                    .col(string_uniq(Planner::ChannelId))
                    .col(string_null(Planner::ClaimsChannelId))
                    .col(string_null(Planner::PingChannelId))
                    .col(string_null(Planner::PingRoleId))
                    .col(string_null(Planner::TicketsRoleId))
                    .col(boolean(Planner::IsActive).default(true))
                    .col(
                        timestamp(Planner::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Planner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Planner {
    Table,
    Id,
    ChannelId,
    ClaimsChannelId,
    PingChannelId,
    PingRoleId,
    TicketsRoleId,
    IsActive,
    CreatedAt,
}
