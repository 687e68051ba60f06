//! Domain models for planned banners and tile claims.

use chrono::{DateTime, Duration, Utc};

/// Time a captured banner stays fresh.
pub fn banner_lifetime() -> Duration {
    Duration::hours(24)
}

/// Latest capture of a banner tile in the current event, joined with its claim.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedBanner {
    pub tile: String,
    pub planner_channel_id: u64,
    /// Moment the team took the banner.
    pub captured_at: DateTime<Utc>,
    /// Member who promised to recapture it.
    pub claimed_by: Option<u64>,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl PlannedBanner {
    /// Moment the banner goes stale unless recaptured.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.captured_at + banner_lifetime()
    }
}

/// Filter on the claim state of planned banners.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClaimedStatus {
    #[default]
    Any,
    Claimed,
    Unclaimed,
}

impl ClaimedStatus {
    pub fn matches(&self, claimed_by: Option<u64>) -> bool {
        match self {
            ClaimedStatus::Any => true,
            ClaimedStatus::Claimed => claimed_by.is_some(),
            ClaimedStatus::Unclaimed => claimed_by.is_none(),
        }
    }
}

/// Parameters for listing the planned banners of a planner.
#[derive(Debug, Clone)]
pub struct GetPlannedBannersParam {
    pub planner_channel_id: u64,
    /// Tile codes to consider, usually the banner tile list.
    pub tiles: Vec<String>,
    /// Captures before this moment (the event start) are ignored.
    pub since: DateTime<Utc>,
    /// Keep only banners expiring in `[from, to)`.
    pub expire_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub claimed_status: ClaimedStatus,
}

impl GetPlannedBannersParam {
    pub fn new(planner_channel_id: u64, tiles: Vec<String>, since: DateTime<Utc>) -> Self {
        Self {
            planner_channel_id,
            tiles,
            since,
            expire_between: None,
            claimed_status: ClaimedStatus::Any,
        }
    }

    pub fn expiring_between(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.expire_between = Some((from, to));
        self
    }

    pub fn with_status(mut self, claimed_status: ClaimedStatus) -> Self {
        self.claimed_status = claimed_status;
        self
    }
}

/// Claim and capture state of a single tile in a planner.
#[derive(Debug, Clone, PartialEq)]
pub struct TileStatus {
    pub tile: String,
    pub planner_channel_id: u64,
    pub claimed_by: Option<u64>,
    pub claimed_at: Option<DateTime<Utc>>,
    /// Latest capture in the current event, `None` if the team does not hold the tile.
    pub captured_at: Option<DateTime<Utc>>,
}

impl TileStatus {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at.map(|at| at + banner_lifetime())
    }
}
