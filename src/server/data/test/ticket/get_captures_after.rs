use super::*;

/// Tests reading the capture log from a known row.
///
/// Verifies that rows are returned oldest first, start after the given id and respect the
/// limit.
///
/// Expected: Ok with the two rows following the first one
#[tokio::test]
async fn reads_rows_after_id_in_order() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;
    let ch = claim_channel.channel_id.as_str();
    let start = event_start();
    let first = factory::tile_capture::create_capture(db, ch, "1", "AAA", start).await?;
    factory::tile_capture::create_capture(db, ch, "2", "BBB", start + Duration::hours(1))
        .await?;
    factory::tile_capture::create_capture(db, ch, "3", "CCC", start + Duration::hours(2))
        .await?;
    factory::tile_capture::create_capture(db, ch, "4", "DDD", start + Duration::hours(3))
        .await?;

    let repo = TicketRepository::new(db);
    let captures = repo.get_captures_after(first.id, 2).await?;

    let tiles: Vec<&str> = captures.iter().map(|c| c.tile.as_str()).collect();
    assert_eq!(tiles, vec!["BBB", "CCC"]);
    assert_eq!(captures[0].user_id, 2);
    assert_eq!(captures[0].claims_channel_id, ch.parse::<u64>().unwrap());

    Ok(())
}

/// Tests the latest row lookup.
///
/// Expected: Ok(None) on an empty log, then the id of the newest row
#[tokio::test]
async fn latest_capture_id_tracks_newest_row() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let repo = TicketRepository::new(db);

    assert_eq!(repo.latest_capture_id().await?, None);

    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;
    let ch = claim_channel.channel_id.as_str();
    factory::tile_capture::create_capture(db, ch, "1", "AAA", event_start()).await?;
    let newest = factory::tile_capture::create_capture(db, ch, "1", "BBB", event_start()).await?;

    assert_eq!(repo.latest_capture_id().await?, Some(newest.id));

    Ok(())
}
