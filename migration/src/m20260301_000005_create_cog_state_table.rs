use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CogState::Table)
                    .if_not_exists()
                    .col(pk_auto(CogState::Id))
                    .col(string_uniq(CogState::Name))
                    .col(timestamp(CogState::SavedAt))
                    .col(text(CogState::Data))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CogState::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CogState {
    Table,
    Id,
    Name,
    SavedAt,
    Data,
}
