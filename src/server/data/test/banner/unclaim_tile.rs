use super::*;

/// Tests releasing a claimed tile.
///
/// Verifies that claimant and claim time are both cleared.
///
/// Expected: Ok(Some) with the previous claimant
#[tokio::test]
async fn releases_claim_and_returns_previous_claimant() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "AAA", "12").await?;
    let planner_ch: u64 = planner.channel_id.parse().unwrap();

    let repo = BannerRepository::new(db);
    let previous = repo.unclaim_tile(planner_ch, "AAA").await?;

    assert_eq!(previous, Some(12));
    let status = repo
        .get_tile_status(planner_ch, "AAA", event_start())
        .await?
        .unwrap();
    assert_eq!(status.claimed_by, None);
    assert_eq!(status.claimed_at, None);

    Ok(())
}

/// Tests releasing a tile that is not claimed.
///
/// Expected: Ok(None), also for tiles without a claim row
#[tokio::test]
async fn rejects_unclaim_of_unclaimed_tile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "AAA", "12").await?;
    let planner_ch: u64 = planner.channel_id.parse().unwrap();

    let repo = BannerRepository::new(db);
    assert_eq!(repo.unclaim_tile(planner_ch, "AAA").await?, Some(12));
    assert_eq!(repo.unclaim_tile(planner_ch, "AAA").await?, None);
    assert_eq!(repo.unclaim_tile(planner_ch, "BBB").await?, None);

    Ok(())
}
