use super::*;

/// Tests the tracked channel lookup.
///
/// Expected: Ok(true) for registered channels, Ok(false) otherwise
#[tokio::test]
async fn reports_registered_channels() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_planner_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;

    let repo = TicketRepository::new(db);

    assert!(repo
        .is_channel_tracked(claim_channel.channel_id.parse().unwrap())
        .await?);
    assert!(!repo.is_channel_tracked(1).await?);

    Ok(())
}
