//! The operations the views depend on.

use crate::error::Result;
use async_trait::async_trait;
use insyd_core::{CreateEventParams, Notification, NotificationId, UserId};

/// Remote notification operations.
///
/// [`InsydClient`](crate::InsydClient) implements this over HTTP; views take
/// it as a trait object so tests can substitute an in-memory service.
#[async_trait]
pub trait NotificationApi: Send + Sync {
    /// Fetch a user's notifications in server order, optionally only unread ones.
    async fn list_notifications(&self, user_id: &UserId, only_unread: bool)
        -> Result<Vec<Notification>>;

    /// Create a notification event; returns the stored notification.
    async fn create_notification(&self, params: &CreateEventParams) -> Result<Notification>;

    /// Mark a notification read; returns the updated notification.
    async fn mark_read(&self, id: &NotificationId) -> Result<Notification>;
}
