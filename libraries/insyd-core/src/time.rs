//! Relative timestamps for notification lists.

use chrono::{DateTime, Utc};

/// Render how long ago `created_at` (ISO-8601) was, relative to `now`.
///
/// Whole days win over whole hours; anything younger than an hour, or in
/// the future, is "Just now". Timestamps that don't parse are returned as-is.
pub fn relative_time(created_at: &str, now: DateTime<Utc>) -> String {
    let Ok(created) = DateTime::parse_from_rfc3339(created_at) else {
        return created_at.to_string();
    };

    let hours = now.signed_duration_since(created).num_hours();
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else {
        "Just now".to_string()
    }
}
