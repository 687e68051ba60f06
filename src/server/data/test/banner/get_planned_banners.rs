use super::*;

/// Tests listing the planned banners of a linked planner.
///
/// Verifies that only the latest capture of each requested tile is returned,
/// joined with its claim, and that captures before the event start or of
/// other tiles are ignored.
///
/// Expected: Ok with one banner per captured tile, oldest capture first
#[tokio::test]
async fn returns_latest_capture_per_tile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    let ch = claim_channel.channel_id.as_str();
    let start = event_start();

    factory::tile_capture::create_capture(db, ch, "1", "AAA", start - Duration::hours(1)).await?;
    factory::tile_capture::create_capture(db, ch, "1", "AAA", start + Duration::hours(1)).await?;
    factory::tile_capture::create_capture(db, ch, "2", "AAA", start + Duration::hours(5)).await?;
    factory::tile_capture::create_capture(db, ch, "2", "BBB", start + Duration::hours(3)).await?;
    factory::tile_capture::create_capture(db, ch, "2", "ZZZ", start + Duration::hours(2)).await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "BBB", "9").await?;

    let repo = BannerRepository::new(db);
    let banners = repo
        .get_planned_banners(GetPlannedBannersParam::new(
            planner.channel_id.parse().unwrap(),
            tiles(&["AAA", "BBB"]),
            start,
        ))
        .await?;

    assert_eq!(banners.len(), 2);
    assert_eq!(banners[0].tile, "BBB");
    assert_eq!(banners[0].captured_at, start + Duration::hours(3));
    assert_eq!(banners[0].claimed_by, Some(9));
    assert!(banners[0].claimed_at.is_some());
    assert_eq!(banners[1].tile, "AAA");
    assert_eq!(banners[1].captured_at, start + Duration::hours(5));
    assert_eq!(banners[1].claimed_by, None);

    Ok(())
}

/// Tests the expiry window and claim filters.
///
/// Verifies that the window is half-open on the expiry time and that the
/// claimed filter drops unclaimed banners.
///
/// Expected: Ok with only the claimed banner expiring inside the window
#[tokio::test]
async fn filters_by_expiry_window_and_claim() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    let ch = claim_channel.channel_id.as_str();
    let start = event_start();

    // Expire at start + 25h, 26h and 27h
    factory::tile_capture::create_capture(db, ch, "1", "AAA", start + Duration::hours(1)).await?;
    factory::tile_capture::create_capture(db, ch, "1", "BBB", start + Duration::hours(2)).await?;
    factory::tile_capture::create_capture(db, ch, "1", "CCC", start + Duration::hours(3)).await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "AAA", "5").await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "CCC", "5").await?;

    let repo = BannerRepository::new(db);
    let param = GetPlannedBannersParam::new(
        planner.channel_id.parse().unwrap(),
        tiles(&["AAA", "BBB", "CCC"]),
        start,
    )
    .expiring_between(start + Duration::hours(25), start + Duration::hours(27));

    let any = repo.get_planned_banners(param.clone()).await?;
    let any_tiles: Vec<&str> = any.iter().map(|b| b.tile.as_str()).collect();
    assert_eq!(any_tiles, vec!["AAA", "BBB"]);

    let claimed = repo
        .get_planned_banners(param.clone().with_status(ClaimedStatus::Claimed))
        .await?;
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].tile, "AAA");

    let unclaimed = repo
        .get_planned_banners(param.with_status(ClaimedStatus::Unclaimed))
        .await?;
    assert_eq!(unclaimed.len(), 1);
    assert_eq!(unclaimed[0].tile, "BBB");

    Ok(())
}

/// Tests a planner without a claims channel.
///
/// Expected: Ok with no banners
#[tokio::test]
async fn returns_empty_without_claims_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let planner = factory::planner::create_planner(db).await?;

    let repo = BannerRepository::new(db);
    let banners = repo
        .get_planned_banners(GetPlannedBannersParam::new(
            planner.channel_id.parse().unwrap(),
            tiles(&["AAA"]),
            event_start(),
        ))
        .await?;

    assert!(banners.is_empty());

    Ok(())
}
