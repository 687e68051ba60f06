use super::*;

/// Tests counting tickets a member used in one CT day.
///
/// Verifies that the window is half-open and that other members and other
/// channels are not counted.
///
/// Expected: Ok with the member's captures inside the window
#[tokio::test]
async fn counts_member_captures_in_window() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;
    let other_channel = factory::claim_channel::create_claim_channel(db).await?;
    let ch = claim_channel.channel_id.as_str();
    let start = event_start();
    let end = start + Duration::days(1);

    factory::tile_capture::create_capture(db, ch, "1", "AAA", start).await?;
    factory::tile_capture::create_capture(db, ch, "1", "BBB", start + Duration::hours(23))
        .await?;
    factory::tile_capture::create_capture(db, ch, "1", "CCC", end).await?;
    factory::tile_capture::create_capture(db, ch, "1", "DDD", start - Duration::seconds(1))
        .await?;
    factory::tile_capture::create_capture(db, ch, "2", "EEE", start + Duration::hours(1)).await?;
    factory::tile_capture::create_capture(
        db,
        &other_channel.channel_id,
        "1",
        "FFF",
        start + Duration::hours(1),
    )
    .await?;

    let repo = TicketRepository::new(db);
    let count = repo
        .count_captures_between(1, ch.parse().unwrap(), start, end)
        .await?;

    assert_eq!(count, 2);

    Ok(())
}
