use chrono::Duration;
use sea_orm::DbErr;

use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId { value, source: e })?;

    Ok(result)
}

/// Parses a Discord id column at the repository boundary.
///
/// # Arguments
/// - `field` - Column name, used in the error message
/// - `value` - Stored id
///
/// # Returns
/// - `Ok(u64)` - Parsed id
/// - `Err(DbErr::Custom)` - Stored value is not a valid id
pub fn parse_id_column(field: &str, value: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
}

/// Parses an optional Discord id column.
pub fn parse_optional_id_column(field: &str, value: Option<&str>) -> Result<Option<u64>, DbErr> {
    value.map(|v| parse_id_column(field, v)).transpose()
}

/// Parses a channel or role typed in a form, as a raw id or a mention.
///
/// Accepts `123`, `<#123>`, `<@&123>`, `<@123>` and `<@!123>`.
pub fn parse_mention_id(value: &str) -> Option<u64> {
    let value = value.trim();
    let id = match value.strip_prefix('<').and_then(|v| v.strip_suffix('>')) {
        Some(mention) => mention
            .strip_prefix('#')
            .or_else(|| mention.strip_prefix("@&"))
            .or_else(|| mention.strip_prefix("@!"))
            .or_else(|| mention.strip_prefix('@'))?,
        None => value,
    };

    id.parse().ok()
}

/// Parses a `hours:minutes` delay of at most one day.
pub fn parse_hours_minutes(value: &str) -> Option<Duration> {
    let (hours, minutes) = value.trim().split_once(':')?;
    let hours: i64 = hours.trim().parse().ok()?;
    let minutes: i64 = minutes.trim().parse().ok()?;
    if hours < 0 || !(0..60).contains(&minutes) {
        return None;
    }

    let delay = Duration::hours(hours) + Duration::minutes(minutes);
    (delay <= Duration::hours(24)).then_some(delay)
}
