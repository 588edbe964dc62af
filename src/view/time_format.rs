//! Timestamp text for the Time column.

use crate::view_state::time_mode::DisplayTimeMode;
use chrono::{DateTime, Utc};

/// Wall-clock format of absolute timestamps.
pub const ABSOLUTE_FORMAT: &str = "%H:%M:%S";

/// Shown when a breadcrumb has no timestamp.
pub const MISSING_TIME: &str = "-";

/// `HH:MM:SS` in UTC.
pub fn format_absolute(timestamp: DateTime<Utc>) -> String {
    timestamp.format(ABSOLUTE_FORMAT).to_string()
}

/// Distance from `reference`, e.g. `2m 5s before` or `1h 0m 3s after`.
pub fn format_relative(timestamp: DateTime<Utc>, reference: DateTime<Utc>) -> String {
    let delta = timestamp.signed_duration_since(reference);
    let total = delta.num_seconds();
    if total == 0 {
        return "0s".to_string();
    }
    let direction = if total < 0 { "before" } else { "after" };
    let secs = total.unsigned_abs();
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    let amount = match (h, m) {
        (0, 0) => format!("{s}s"),
        (0, _) => format!("{m}m {s}s"),
        _ => format!("{h}h {m}m {s}s"),
    };
    format!("{amount} {direction}")
}

/// Time cell text for a display mode. Relative mode without a reference
/// falls back to absolute.
pub fn format_time(
    timestamp: Option<DateTime<Utc>>,
    mode: DisplayTimeMode,
    reference: Option<DateTime<Utc>>,
) -> String {
    match (timestamp, mode, reference) {
        (None, _, _) => MISSING_TIME.to_string(),
        (Some(ts), DisplayTimeMode::Relative, Some(reference)) => format_relative(ts, reference),
        (Some(ts), _, _) => format_absolute(ts),
    }
}
