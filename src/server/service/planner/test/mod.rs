use crate::server::{
    config::PlannerSettings,
    error::{planner::PlannerError, AppError},
    model::discord::GuildMember,
    service::{
        discord::mock::{Call, MockDiscord},
        planner::PlannerService,
    },
    state::PlannerState,
    util::period::{Epoch, EventCalendar},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use test_utils::{builder::TestBuilder, factory, factory::planner::PlannerFactory};


const GUILD: u64 = 10;
const BOT: u64 = 1;
const PING_CHANNEL: u64 = 70;
const TEAM_ROLE: u64 = 80;
const TICKETS_ROLE: u64 = 90;
const MEMBER: u64 = 500;

/// Start of the event the tests run in.
fn event_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
}

/// Calendar with an event starting at `event_start()`.
fn calendar() -> EventCalendar {
    EventCalendar::new(
        vec![Epoch {
            event: 0,
            start: event_start().timestamp(),
        }],
        7,
    )
    .unwrap()
}

fn planner_state(db: &DatabaseConnection) -> PlannerState {
    PlannerState::new(
        db.clone(),
        PlannerSettings::default(),
        calendar(),
        event_start(),
    )
    .with_banner_tiles(&["AAA", "BBB", "CCC", "DDD", "EEE", "FFF"])
}

/// Creates a planner linked to a tracked claims channel, with a ping channel and a team role.
///
/// # Returns
/// - `(planner_channel_id, claims_channel_id)`
async fn create_team_planner(
    db: &DatabaseConnection,
    with_tickets_role: bool,
) -> Result<(u64, String), DbErr> {
    let claim_channel = factory::claim_channel::create_claim_channel(db).await?;
    let planner = PlannerFactory::new(db)
        .claims_channel_id(Some(claim_channel.channel_id.clone()))
        .ping_channel_id(Some(PING_CHANNEL.to_string()))
        .ping_role_id(Some(TEAM_ROLE.to_string()))
        .tickets_role_id(with_tickets_role.then(|| TICKETS_ROLE.to_string()))
        .build()
        .await?;

    Ok((planner.channel_id.parse().unwrap(), claim_channel.channel_id))
}

/// Transport knowing the planner channel, the ping channel and both planner roles.
fn mock_discord(planner_ch: u64) -> MockDiscord {
    let discord = MockDiscord::new(BOT);
    discord.add_channel(planner_ch, GUILD);
    discord.add_channel(PING_CHANNEL, GUILD);
    discord.add_role(GUILD, TEAM_ROLE, "Team");
    discord.add_role(GUILD, TICKETS_ROLE, "Team (has tickets)");
    discord
}

fn team_member(user_id: u64) -> GuildMember {
    GuildMember {
        user_id,
        role_ids: vec![TEAM_ROLE],
    }
}
