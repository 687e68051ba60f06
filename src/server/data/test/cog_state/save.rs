use super::*;

/// Tests saving twice under the same name.
///
/// Verifies that the second save replaces the first instead of adding a row.
///
/// Expected: Ok with only the latest checkpoint stored
#[tokio::test]
async fn replaces_previous_checkpoint() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first_at = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    let second_at = first_at + Duration::minutes(30);

    let repo = CogStateRepository::new(db);
    repo.save("planner", "first".to_string(), first_at).await?;
    repo.save("planner", "second".to_string(), second_at).await?;
    repo.save("other", "kept".to_string(), first_at).await?;

    let state = repo.get("planner").await?.unwrap();
    assert_eq!(state.data, "second");
    assert_eq!(state.saved_at, second_at);

    let other = repo.get("other").await?.unwrap();
    assert_eq!(other.data, "kept");

    Ok(())
}
