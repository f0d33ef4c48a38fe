use crate::error::{GhHeatError, Result};
use chrono::{DateTime, Utc};

pub const DAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tues", "Wed", "Thurs", "Fri", "Sat"];

pub const BLOCK_LABELS: [&str; 8] = [
    "01-03", "04-06", "07-09", "10-12", "13-15", "16-18", "19-21", "22-00",
];

/// Parse a stored commit timestamp, normalizing to UTC.
pub fn parse_commit_date(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| GhHeatError::InvalidDate(format!("'{raw}': {e}")))
}

/// Index into [`BLOCK_LABELS`] for an hour of the day: block `h / 3`, whose
/// label runs from `(h / 3) * 3 + 1` to `(h / 3) * 3 + 3`. Hour 0 belongs to
/// the block ending at midnight, "22-00".
pub fn hour_block_index(hour: u32) -> usize {
    match hour % 24 {
        0 => BLOCK_LABELS.len() - 1,
        h => (h / 3) as usize,
    }
}
