//! Schedule-time parsing helpers
//!
//! Clients submit schedule times in a handful of formats; everything is
//! normalized to naive UTC before storage.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse a user-supplied schedule time into naive UTC.
///
/// Accepted forms:
/// - ISO-8601 with a trailing `Z` or an explicit offset (converted to UTC)
/// - `YYYY-MM-DDTHH:MM[:SS]` (treated as already-UTC)
/// - `YYYY-MM-DD HH:MM` and `YYYY-MM-DD HH:MM AM/PM`
///
/// Returns None for empty or unparseable input.
pub fn parse_schedule_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    // Offset-aware ISO-8601 first: convert to UTC, then drop the zone.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }

    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%d %I:%M %p",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    None
}

/// Format a naive-UTC timestamp as ISO-8601 with a trailing `Z`
pub fn format_utc_z(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
