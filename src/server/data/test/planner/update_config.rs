use super::*;

/// Tests setting a subset of configuration fields.
///
/// Verifies that fields left `None` keep their stored values.
///
/// Expected: Ok(Some) with only the given fields changed
#[tokio::test]
async fn updates_only_given_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::planner::PlannerFactory::new(db)
        .channel_id("10")
        .ping_role_id(Some("20".to_string()))
        .build()
        .await?;

    let repo = PlannerRepository::new(db);
    let updated = repo
        .update_config(UpdatePlannerConfigParam {
            ping_channel_id: Some(30),
            is_active: Some(false),
            ..UpdatePlannerConfigParam::new(10)
        })
        .await?
        .unwrap();

    assert_eq!(updated.ping_channel_id, Some(30));
    assert_eq!(updated.ping_role_id, Some(20));
    assert!(!updated.is_active);

    let stored = repo.get_by_channel_id(10).await?.unwrap();
    assert_eq!(stored, updated);

    Ok(())
}

/// Tests updating a channel that is not a planner.
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
    let result = repo
        .update_config(UpdatePlannerConfigParam {
            ping_channel_id: Some(1),
            ..UpdatePlannerConfigParam::new(5)
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}

/// Tests an update that sets nothing.
///
/// Expected: Ok(Some) with the planner unchanged
#[tokio::test]
async fn empty_update_returns_planner_unchanged() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::planner::PlannerFactory::new(db)
        .channel_id("10")
        .build()
        .await?;

    let repo = PlannerRepository::new(db);
    let before = repo.get_by_channel_id(10).await?.unwrap();
    let after = repo
        .update_config(UpdatePlannerConfigParam::new(10))
        .await?
        .unwrap();

    assert_eq!(before, after);

    Ok(())
}
