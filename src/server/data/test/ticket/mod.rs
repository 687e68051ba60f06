use crate::server::data::ticket::TicketRepository;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sea_orm::{DbErr, EntityTrait};
use test_utils::{builder::TestBuilder, factory};

mod count_captures_between;
mod edit_capture_time;
mod get_captures_after;
mod is_channel_tracked;

fn event_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap()
}
