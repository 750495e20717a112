use chrono::{Local, TimeZone};

/// Marker for a rotation that has already started.
pub const MARKER_CURRENT: &str = "現在";

/// Marker for a rotation that has not started yet.
pub const MARKER_UPCOMING: &str = ":soon:";

/// Two full-width spaces, the indentation unit used in replies.
pub const INDENT: &str = "\u{3000}\u{3000}";

/// Render an epoch-milliseconds timestamp as `MM/DD HH:mm` in local time.
pub fn format_timestamp(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(dt) => dt.format("%m/%d %H:%M").to_string(),
        None => "??/?? ??:??".to_string(),
    }
}

/// Pick the marker for a rotation starting at `start_ms`.
/// A rotation starting exactly now counts as current.
pub fn availability_marker(start_ms: i64, now_ms: i64) -> &'static str {
    if start_ms <= now_ms {
        MARKER_CURRENT
    } else {
        MARKER_UPCOMING
    }
}

/// Rotation length in hours, exactly `(end - start) / 3_600_000`.
pub fn duration_hours(start_ms: i64, end_ms: i64) -> f64 {
    (end_ms - start_ms) as f64 / 3_600_000.0
}

/// Full-width blanks matching the visual width of `label`,
/// used to align continuation lines under a labeled first line.
pub fn fullwidth_pad(label: &str) -> String {
    "\u{3000}".repeat(label.chars().count())
}

/// User-facing message for a failed schedule fetch.
pub fn fetch_failure_message(status: Option<u16>) -> String {
    match status {
        Some(code) => format!("データ取得に失敗しました。(HTTP-{})", code),
        None => "データ取得に失敗しました。".to_string(),
    }
}
