use super::*;

/// Tests creating a planner in a fresh channel.
///
/// Verifies that the repository stores an active planner with every optional
/// configuration field empty.
///
/// Expected: Ok with planner created
#[tokio::test]
async fn creates_active_unconfigured_planner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlannerRepository::new(db);
    let planner = repo.create(123_456).await?;

    assert_eq!(planner.channel_id, 123_456);
    assert!(planner.is_active);
    assert_eq!(planner.claims_channel_id, None);
    assert_eq!(planner.ping_channel_id, None);
    assert_eq!(planner.ping_role_id, None);
    assert_eq!(planner.tickets_role_id, None);

    Ok(())
}

/// Tests creating a second planner in the same channel.
///
/// Verifies that the unique index on the channel id rejects the duplicate.
///
/// Expected: Err
#[tokio::test]
async fn rejects_duplicate_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlannerRepository::new(db);
    repo.create(42).await?;
    let result = repo.create(42).await;

    assert!(result.is_err());

    Ok(())
}
