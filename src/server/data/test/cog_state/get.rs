use super::*;

/// Tests reading a name nothing was saved under.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_never_saved() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CogStateRepository::new(db);

    assert!(repo.get("planner").await?.is_none());

    Ok(())
}

/// Tests reading a saved checkpoint.
///
/// Expected: Ok(Some) with the saved data and timestamp
#[tokio::test]
async fn returns_saved_checkpoint() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let saved_at = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    let repo = CogStateRepository::new(db);
    repo.save("planner", "{\"a\":1}".to_string(), saved_at).await?;

    let state = repo.get("planner").await?.unwrap();

    assert_eq!(state.name, "planner");
    assert_eq!(state.data, "{\"a\":1}");
    assert_eq!(state.saved_at, saved_at);

    Ok(())
}
