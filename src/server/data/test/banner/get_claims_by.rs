use super::*;

/// Tests listing the tiles a member claims.
///
/// Verifies that claims in other planners and by other members are excluded.
///
/// Expected: Ok with the member's tiles in this planner, sorted
#[tokio::test]
async fn lists_member_claims_in_planner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let planner = factory::planner::create_planner(db).await?;
    let other = factory::planner::create_planner(db).await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "CCC", "1").await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "AAA", "1").await?;
    factory::tile_claim::create_claim(db, &planner.channel_id, "BBB", "2").await?;
    factory::tile_claim::create_claim(db, &other.channel_id, "DDD", "1").await?;

    let repo = BannerRepository::new(db);
    let claims = repo
        .get_claims_by(1, planner.channel_id.parse().unwrap())
        .await?;

    assert_eq!(claims, tiles(&["AAA", "CCC"]));

    Ok(())
}
