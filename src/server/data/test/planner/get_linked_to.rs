use super::*;

/// Tests finding the planner linked to a claims channel.
///
/// Expected: Ok(Some) with the linked planner
#[tokio::test]
async fn finds_linked_planner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (claim_channel, planner) = factory::helpers::create_linked_planner(db).await?;
    factory::planner::create_planner(db).await?;

    let repo = PlannerRepository::new(db);
    let linked = repo
        .get_linked_to(claim_channel.channel_id.parse().unwrap())
        .await?
        .unwrap();

    assert_eq!(linked.channel_id.to_string(), planner.channel_id);

    Ok(())
}

/// Tests a claims channel no planner reads from.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_unlinked() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;

    let repo = PlannerRepository::new(db);
    let linked = repo
        .get_linked_to(claim_channel.channel_id.parse().unwrap())
        .await?;

    assert!(linked.is_none());

    Ok(())
}
