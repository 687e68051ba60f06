use super::*;

/// Tests the status of a captured and claimed tile.
///
/// Expected: Ok(Some) with capture and claim populated
#[tokio::test]
async fn returns_capture_and_claim() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    let captured_at = event_start() + Duration::hours(4);
    factory::tile_capture::create_capture(db, &claim_channel.channel_id, "1", "MRX", captured_at)
        .await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "MRX", "8").await?;

    let repo = BannerRepository::new(db);
    let status = repo
        .get_tile_status(planner.channel_id.parse().unwrap(), "MRX", event_start())
        .await?
        .unwrap();

    assert_eq!(status.tile, "MRX");
    assert_eq!(status.claimed_by, Some(8));
    assert_eq!(status.captured_at, Some(captured_at));
    assert_eq!(status.expires_at(), Some(captured_at + Duration::hours(24)));

    Ok(())
}

/// Tests the status of a tile the team never took.
///
/// Expected: Ok(Some) with no capture and no claim
#[tokio::test]
async fn returns_empty_status_for_untouched_tile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;

    let repo = BannerRepository::new(db);
    let status = repo
        .get_tile_status(planner.channel_id.parse().unwrap(), "AAA", event_start())
        .await?
        .unwrap();

    assert_eq!(status.claimed_by, None);
    assert_eq!(status.captured_at, None);

    Ok(())
}

/// Tests the status lookup in a channel that is not a planner.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_planner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = BannerRepository::new(db);
    let status = repo.get_tile_status(404, "AAA", event_start()).await?;

    assert!(status.is_none());

    Ok(())
}
