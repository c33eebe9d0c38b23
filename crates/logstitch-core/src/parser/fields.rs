// Field extractors shared by the access and application parsers
// all of these are total: bad input degrades to a default instead of an error

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format: 27/Jun/2025:20:00:02 +0700
pub const ACCESS_TIMESTAMP_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Format: 2025-06-28 06:12:45.107 (no zone, read as UTC)
pub const APPLICATION_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Reported when a request line carries no `HTTP/` token
pub const DEFAULT_HTTP_VERSION: &str = "HTTP/1.0";

/// Timestamp layouts are not self-describing, so callers say which one to expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampLayout {
    Access,
    Application,
}

impl TimestampLayout {
    pub fn format(&self) -> &'static str {
        match self {
            Self::Access => ACCESS_TIMESTAMP_FORMAT,
            Self::Application => APPLICATION_TIMESTAMP_FORMAT,
        }
    }
}

/// Parse a timestamp in the given layout, None when it does not fit.
pub fn try_parse_timestamp(raw: &str, layout: TimestampLayout) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    match layout {
        TimestampLayout::Access => DateTime::parse_from_str(raw, layout.format())
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        TimestampLayout::Application => NaiveDateTime::parse_from_str(raw, layout.format())
            .ok()
            .map(|naive| DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)),
    }
}

/// Parse a timestamp, substituting the current wall-clock time on failure.
pub fn parse_timestamp(raw: &str, layout: TimestampLayout) -> DateTime<Utc> {
    try_parse_timestamp(raw, layout).unwrap_or_else(Utc::now)
}

/// Lenient integer parse: empty, `-` and garbage all become 0.
pub fn parse_integer(raw: &str) -> i64 {
    match raw.trim() {
        "" | "-" => 0,
        s => s.parse().unwrap_or(0),
    }
}

/// Split `"METHOD PATH VERSION"` into (method, path).
/// Both are None when fewer than two tokens exist.
pub fn split_request_line(raw: &str) -> (Option<&str>, Option<&str>) {
    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(method), Some(path)) => (Some(method), Some(path)),
        _ => (None, None),
    }
}

pub fn extract_http_version(raw: &str) -> &str {
    raw.rfind("HTTP/")
        .and_then(|idx| raw[idx..].split_whitespace().next())
        .unwrap_or(DEFAULT_HTTP_VERSION)
}
