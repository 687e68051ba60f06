//! Shared helper utilities for factory methods.

use sea_orm::{DatabaseConnection, DbErr};

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// Provides monotonically increasing values for generating unique Discord ids across all
/// factories.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a planner linked to a tracked claims channel.
///
/// Creates:
/// 1. Claim channel (tracked by the ticket tracker)
/// 2. Planner with `claims_channel_id` pointing at it
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok((claim_channel, planner))` - Tuple of created entities
/// - `Err(DbErr)` - Database error during creation
pub async fn create_linked_planner(
    db: &DatabaseConnection,
) -> Result<(entity::claim_channel::Model, entity::planner::Model), DbErr> {
    let claim_channel = super::claim_channel::create_claim_channel(db).await?;
    let planner = super::planner::PlannerFactory::new(db)
        .claims_channel_id(Some(claim_channel.channel_id.clone()))
        .build()
        .await?;

    Ok((claim_channel, planner))
}
