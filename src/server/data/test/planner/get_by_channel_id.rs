use super::*;

/// Tests fetching a configured planner.
///
/// Verifies that stored string ids are parsed back into numeric ids.
///
/// Expected: Ok(Some) with all fields parsed
#[tokio::test]
async fn returns_planner_with_parsed_ids() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::planner::PlannerFactory::new(db)
        .channel_id("100")
        .claims_channel_id(Some("200".to_string()))
        .ping_channel_id(Some("300".to_string()))
        .ping_role_id(Some("400".to_string()))
        .tickets_role_id(Some("500".to_string()))
        .is_active(false)
        .build()
        .await?;

    let repo = PlannerRepository::new(db);
    let planner = repo.get_by_channel_id(100).await?.unwrap();

    assert_eq!(planner.channel_id, 100);
    assert_eq!(planner.claims_channel_id, Some(200));
    assert_eq!(planner.ping_channel_id, Some(300));
    assert_eq!(planner.ping_role_id, Some(400));
    assert_eq!(planner.tickets_role_id, Some(500));
    assert!(!planner.is_active);
    assert_eq!(planner.group_role_id(), Some(500));

    Ok(())
}

/// Tests fetching a channel that is not a planner.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_channel() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = PlannerRepository::new(db);

    assert!(repo.get_by_channel_id(1).await?.is_none());

    Ok(())
}

/// Tests fetching a planner whose stored id is corrupt.
///
/// Expected: Err(DbErr::Custom)
#[tokio::test]
async fn fails_on_unparseable_id() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::planner::PlannerFactory::new(db)
        .channel_id("77")
        .ping_channel_id(Some("not-a-number".to_string()))
        .build()
        .await?;

    let repo = PlannerRepository::new(db);
    let result = repo.get_by_channel_id(77).await;

    assert!(matches!(result, Err(DbErr::Custom(_))));

    Ok(())
}
