use super::*;

/// Tests deleting an existing planner.
///
/// Verifies that the planner is gone afterwards.
///
/// Expected: Ok(true)
#[tokio::test]
async fn deletes_existing_planner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let planner = factory::planner::create_planner(db).await?;
    let channel_id: u64 = planner.channel_id.parse().unwrap();

    let repo = PlannerRepository::new(db);
    let deleted = repo.delete(channel_id).await?;

    assert!(deleted);
    assert!(repo.get_by_channel_id(channel_id).await?.is_none());

    Ok(())
}

/// Tests deleting a channel that is not a planner.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_unknown_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlannerRepository::new(db);
    let deleted = repo.delete(999).await?;

    assert!(!deleted);

    Ok(())
}
