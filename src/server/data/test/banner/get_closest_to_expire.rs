use super::*;

/// Tests collecting the soonest expirations across planners.
///
/// Verifies that expired banners and inactive planners are skipped and that
/// the result is sorted by expiry and truncated to the limit.
///
/// Expected: Ok with the two soonest future expirations
#[tokio::test]
async fn returns_soonest_future_expirations() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let start = event_start();
    let now = start + Duration::hours(30);

    let (first_channel, first) = factory::helpers::create_linked_planner(db).await?;
    let (second_channel, second) = factory::helpers::create_linked_planner(db).await?;
    let paused_channel = factory::claim_channel::create_claim_channel(db).await?;
    factory::planner::PlannerFactory::new(db)
        .claims_channel_id(Some(paused_channel.channel_id.clone()))
        .is_active(false)
        .build()
        .await?;

    let first_ch = first_channel.channel_id.as_str();
    let second_ch = second_channel.channel_id.as_str();

    // Already stale at `now`
    factory::tile_capture::create_capture(db, first_ch, "1", "AAA", start + Duration::hours(2))
        .await?;
    factory::tile_capture::create_capture(db, first_ch, "1", "BBB", start + Duration::hours(12))
        .await?;
    factory::tile_capture::create_capture(db, second_ch, "1", "AAA", start + Duration::hours(8))
        .await?;
    factory::tile_capture::create_capture(db, second_ch, "1", "CCC", start + Duration::hours(20))
        .await?;
    factory::tile_capture::create_capture(
        db,
        &paused_channel.channel_id,
        "1",
        "DDD",
        start + Duration::hours(7),
    )
    .await?;

    let repo = BannerRepository::new(db);
    let banners = repo
        .get_closest_to_expire(&tiles(&["AAA", "BBB", "CCC", "DDD"]), now, start, 2)
        .await?;

    assert_eq!(banners.len(), 2);
    assert_eq!(banners[0].tile, "AAA");
    assert_eq!(banners[0].planner_channel_id.to_string(), second.channel_id);
    assert_eq!(banners[1].tile, "BBB");
    assert_eq!(banners[1].planner_channel_id.to_string(), first.channel_id);

    Ok(())
}
