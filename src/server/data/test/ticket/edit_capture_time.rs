use super::*;

/// Tests moving the latest capture of a tile.
///
/// Verifies that only the most recent capture in the event is rewritten.
///
/// Expected: Ok(true) with the latest capture moved
#[tokio::test]
async fn moves_latest_capture() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;
    let ch = claim_channel.channel_id.as_str();
    let start = event_start();
    let older =
        factory::tile_capture::create_capture(db, ch, "1", "AAA", start + Duration::hours(1))
            .await?;
    let latest =
        factory::tile_capture::create_capture(db, ch, "1", "AAA", start + Duration::hours(4))
            .await?;

    let new_time = start + Duration::hours(6);
    let repo = TicketRepository::new(db);
    let edited = repo
        .edit_capture_time(ch.parse().unwrap(), "AAA", start, new_time)
        .await?;

    assert!(edited);
    let older = entity::prelude::TileCapture::find_by_id(older.id)
        .one(db)
        .await?
        .unwrap();
    let latest = entity::prelude::TileCapture::find_by_id(latest.id)
        .one(db)
        .await?
        .unwrap();
    assert_eq!(older.captured_at, start + Duration::hours(1));
    assert_eq!(latest.captured_at, new_time);

    Ok(())
}

/// Tests editing a tile that was not captured during the event.
///
/// Verifies that captures from before the event start are not touched.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_without_capture_in_event() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;
    let ch = claim_channel.channel_id.as_str();
    let start = event_start();
    factory::tile_capture::create_capture(db, ch, "1", "AAA", start - Duration::hours(1)).await?;

    let repo = TicketRepository::new(db);
    let edited = repo
        .edit_capture_time(ch.parse().unwrap(), "AAA", start, start)
        .await?;

    assert!(!edited);

    Ok(())
}
