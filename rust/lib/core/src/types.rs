use chrono::{DateTime, Utc};

/// Generate a new random document id (UUIDv4, no dashes).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string().replace('-', "")
}

/// Current time as an RFC 3339 string.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}

/// Parse an RFC 3339 timestamp. Malformed input yields `None`.
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
