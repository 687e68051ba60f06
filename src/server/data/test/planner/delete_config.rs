use super::*;

/// Tests clearing configuration fields.
///
/// Verifies that only flagged fields are cleared.
///
/// Expected: Ok(Some) with the flagged fields set to None
#[tokio::test]
async fn clears_flagged_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::planner::PlannerFactory::new(db)
        .channel_id("10")
        .ping_channel_id(Some("11".to_string()))
        .ping_role_id(Some("12".to_string()))
        .tickets_role_id(Some("13".to_string()))
        .build()
        .await?;

    let repo = PlannerRepository::new(db);
    let updated = repo
        .delete_config(DeletePlannerConfigParam {
            ping_channel: true,
            tickets_role: true,
            ..DeletePlannerConfigParam::new(10)
        })
        .await?
        .unwrap();

    assert_eq!(updated.ping_channel_id, None);
    assert_eq!(updated.tickets_role_id, None);
    assert_eq!(updated.ping_role_id, Some(12));
    assert_eq!(updated.group_role_id(), Some(12));

    Ok(())
}

/// Tests clearing configuration of a channel that is not a planner.
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
        .delete_config(DeletePlannerConfigParam {
            ping_role: true,
            ..DeletePlannerConfigParam::new(3)
        })
        .await?;

    assert!(result.is_none());

    Ok(())
}
