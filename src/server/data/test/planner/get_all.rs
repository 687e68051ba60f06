use super::*;

/// Tests listing every planner.
///
/// Expected: Ok with active and inactive planners in creation order
#[tokio::test]
async fn returns_all_planners() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::planner::create_planner(db).await?;
    let second = factory::planner::PlannerFactory::new(db)
        .is_active(false)
        .build()
        .await?;

    let repo = PlannerRepository::new(db);
    let planners = repo.get_all(false).await?;

    let ids: Vec<String> = planners.iter().map(|p| p.channel_id.to_string()).collect();
    assert_eq!(ids, vec![first.channel_id, second.channel_id]);

    Ok(())
}

/// Tests listing only active planners.
///
/// Expected: Ok without the paused planner
#[tokio::test]
async fn filters_inactive_planners() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let active = factory::planner::create_planner(db).await?;
    factory::planner::PlannerFactory::new(db)
        .is_active(false)
        .build()
        .await?;

    let repo = PlannerRepository::new(db);
    let planners = repo.get_all(true).await?;

    assert_eq!(planners.len(), 1);
    assert_eq!(planners[0].channel_id.to_string(), active.channel_id);

    Ok(())
}
