use super::*;

/// Tests claiming a tile nobody claimed before.
///
/// Verifies that claimant and claim time are written together.
///
/// Expected: Ok(true)
#[tokio::test]
async fn claims_fresh_tile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    let planner_ch: u64 = planner.channel_id.parse().unwrap();
    let now = event_start() + Duration::hours(3);

    let repo = BannerRepository::new(db);
    let claimed = repo.claim_tile(planner_ch, "AAA", 7, now).await?;

    assert!(claimed);
    let status = repo
        .get_tile_status(planner_ch, "AAA", event_start())
        .await?
        .unwrap();
    assert_eq!(status.claimed_by, Some(7));
    assert_eq!(status.claimed_at, Some(now));

    Ok(())
}

/// Tests claiming a tile that is already claimed.
///
/// Verifies that the first claimant is kept.
///
/// Expected: Ok(false)
#[tokio::test]
async fn rejects_double_claim() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    let planner_ch: u64 = planner.channel_id.parse().unwrap();
    let now = event_start();

    let repo = BannerRepository::new(db);
    assert!(repo.claim_tile(planner_ch, "AAA", 7, now).await?);
    assert!(!repo.claim_tile(planner_ch, "AAA", 8, now).await?);
    assert!(!repo.claim_tile(planner_ch, "AAA", 7, now).await?);

    let status = repo
        .get_tile_status(planner_ch, "AAA", event_start())
        .await?
        .unwrap();
    assert_eq!(status.claimed_by, Some(7));

    Ok(())
}

/// Tests claiming a tile whose previous claim was released.
///
/// Verifies that the existing claim row is reused.
///
/// Expected: Ok(true)
#[tokio::test]
async fn reclaims_released_tile() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (_claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    let planner_ch: u64 = planner.channel_id.parse().unwrap();
    let now = event_start();

    let repo = BannerRepository::new(db);
    repo.claim_tile(planner_ch, "AAA", 7, now).await?;
    repo.unclaim_tile(planner_ch, "AAA").await?;
    let claimed = repo.claim_tile(planner_ch, "AAA", 8, now).await?;

    assert!(claimed);
    assert_eq!(repo.get_claims_by(8, planner_ch).await?, vec!["AAA".to_string()]);
    assert!(repo.get_claims_by(7, planner_ch).await?.is_empty());

    Ok(())
}
