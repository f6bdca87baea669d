/// Notification domain types
use super::{NotificationId, UserId};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of event a notification reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Someone followed the user
    #[default]
    Follow,
    /// Someone liked a post
    Like,
    /// Someone commented on a post
    Comment,
    /// Someone shared a job opportunity
    ShareJob,
    /// Someone shared a blog post
    ShareBlog,
}

impl NotificationType {
    /// All types, in display order
    pub const ALL: [NotificationType; 5] = [
        NotificationType::Follow,
        NotificationType::Like,
        NotificationType::Comment,
        NotificationType::ShareJob,
        NotificationType::ShareBlog,
    ];

    /// Wire name (`FOLLOW`, `SHARE_JOB`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Follow => "FOLLOW",
            NotificationType::Like => "LIKE",
            NotificationType::Comment => "COMMENT",
            NotificationType::ShareJob => "SHARE_JOB",
            NotificationType::ShareBlog => "SHARE_BLOG",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::Follow => "Follow",
            NotificationType::Like => "Like",
            NotificationType::Comment => "Comment",
            NotificationType::ShareJob => "Share Job",
            NotificationType::ShareBlog => "Share Blog",
        }
    }

    /// Single glyph shown next to a notification
    pub fn glyph(&self) -> &'static str {
        match self {
            NotificationType::Follow => "👤",
            NotificationType::Like => "♥",
            NotificationType::Comment => "💬",
            NotificationType::ShareJob => "💼",
            NotificationType::ShareBlog => "📝",
        }
    }

    /// Canned content used to pre-fill the event form
    pub fn sample_content(&self) -> &'static str {
        match self {
            NotificationType::Follow => "Alice followed you",
            NotificationType::Like => "Bob liked your post",
            NotificationType::Comment => "Charlie commented on your post",
            NotificationType::ShareJob => "David shared a job opportunity",
            NotificationType::ShareBlog => "Emma shared a blog post",
        }
    }

    /// Next type in display order, wrapping around
    pub fn next(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous type in display order, wrapping around
    pub fn previous(&self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationType {
    type Err = CoreError;

    /// Accepts the wire name case-insensitively, with `-` or space in place of `_`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        NotificationType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownNotificationType(s.to_string()))
    }
}

/// A notification as held by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Server-assigned identifier
    #[serde(rename = "_id")]
    pub id: NotificationId,

    /// Owning user
    pub user_id: UserId,

    /// Event kind
    #[serde(rename = "type")]
    pub kind: NotificationType,

    /// Free-text content
    pub content: String,

    /// Whether the user has read it
    pub is_read: bool,

    /// Creation timestamp (ISO-8601 string)
    pub created_at: String,
}

impl Notification {
    /// Whether the notification is still unread
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }
}

/// Request body for creating a notification event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventParams {
    /// User who will receive the notification
    pub user_id: UserId,

    /// Event kind
    #[serde(rename = "type")]
    pub kind: NotificationType,

    /// Message displayed in the notification
    pub content: String,
}

impl CreateEventParams {
    /// Create event parameters
    pub fn new(user_id: impl Into<UserId>, kind: NotificationType, content: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_wire_format() {
        let json = serde_json::json!({
            "_id": "n1",
            "userId": "user123",
            "type": "SHARE_JOB",
            "content": "David shared a job opportunity",
            "isRead": false,
            "createdAt": "2024-05-01T10:00:00.000Z"
        });

        let notification: Notification = serde_json::from_value(json).unwrap();
        assert_eq!(notification.id.as_str(), "n1");
        assert_eq!(notification.user_id.as_str(), "user123");
        assert_eq!(notification.kind, NotificationType::ShareJob);
        assert!(notification.is_unread());
        assert_eq!(notification.created_at, "2024-05-01T10:00:00.000Z");
    }

    #[test]
    fn test_notification_ignores_extra_server_fields() {
        let json = r#"{"_id":"n2","userId":"u1","type":"LIKE","content":"x","isRead":true,
            "createdAt":"2024-05-01T10:00:00Z","__v":0,"updatedAt":"2024-05-01T10:00:01Z"}"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert!(notification.is_read);
    }

    #[test]
    fn test_create_event_params_body() {
        let params = CreateEventParams::new("u1", NotificationType::Like, "x");
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "userId": "u1", "type": "LIKE", "content": "x" })
        );
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("FOLLOW".parse::<NotificationType>().unwrap(), NotificationType::Follow);
        assert_eq!("like".parse::<NotificationType>().unwrap(), NotificationType::Like);
        assert_eq!("share-job".parse::<NotificationType>().unwrap(), NotificationType::ShareJob);
        assert_eq!("Share Blog".parse::<NotificationType>().unwrap(), NotificationType::ShareBlog);
        assert!("POKE".parse::<NotificationType>().is_err());
    }

    #[test]
    fn test_type_cycling_wraps() {
        assert_eq!(NotificationType::Follow.previous(), NotificationType::ShareBlog);
        assert_eq!(NotificationType::ShareBlog.next(), NotificationType::Follow);

        let mut t = NotificationType::Follow;
        for _ in 0..NotificationType::ALL.len() {
            t = t.next();
        }
        assert_eq!(t, NotificationType::Follow);
    }

    #[test]
    fn test_default_type_is_first() {
        assert_eq!(NotificationType::default(), NotificationType::ALL[0]);
        assert_eq!(NotificationType::default().sample_content(), "Alice followed you");
    }
}
