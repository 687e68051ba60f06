use thiserror::Error;

/// Rejections of user-facing planner operations.
///
/// Returned synchronously to the user who triggered the operation. No state is mutated when
/// one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("This channel is not a planner.")]
    NotAPlanner,

    #[error("This channel is already a planner.")]
    AlreadyAPlanner,

    #[error("Tile `{0}` is not a banner tile tracked by this planner.")]
    TileNotInPlanner(String),

    #[error("Tile `{0}` is already claimed.")]
    TileAlreadyClaimed(String),

    #[error("Tile `{0}` is not claimed by anyone.")]
    TileNotClaimed(String),

    #[error("Hands off! Someone else already claimed `{0}`.")]
    ClaimedBySomeoneElse(String),

    #[error("You can only claim up to {0} tiles at once.")]
    ClaimLimitReached(usize),

    #[error("You need the planner's team role to claim tiles.")]
    MissingTeamRole,

    #[error("<#{0}> is already linked to another planner.")]
    ClaimsChannelAlreadyLinked(u64),

    #[error("<#{0}> is not tracked by the ticket tracker.")]
    ClaimsChannelNotTracked(u64),

    #[error("You must change at least one value.")]
    NothingToConfigure,

    #[error("`{0}` is not a channel or role.")]
    InvalidId(String),

    #[error("`{0}` is not a valid time, use hours:minutes up to 24:00 like `5:30`.")]
    InvalidDuration(String),
}
