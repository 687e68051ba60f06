use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TileCapture::Table)
                    .if_not_exists()
                    .col(pk_auto(TileCapture::Id))
                    .col(string(TileCapture::ClaimsChannelId))
                    .col(string(TileCapture::UserId))
                    .col(string(TileCapture::Tile))
                    .col(timestamp(TileCapture::CapturedAt))
                    .to_owned(),
            )
            .await?;

        // Latest-capture lookups filter by channel and tile
        manager
            .create_index(
                Index::create()
                    .name("idx_tile_capture_channel_tile")
                    .table(TileCapture::Table)
                    .col(TileCapture::ClaimsChannelId)
                    .col(TileCapture::Tile)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tile_capture_channel_tile")
                    .table(TileCapture::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TileCapture::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum TileCapture {
    Table,
    Id,
    ClaimsChannelId,
    UserId,
    Tile,
    CapturedAt,
}
