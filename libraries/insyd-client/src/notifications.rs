//! Notification endpoints of the Insyd API.

use crate::error::{ClientError, Result};
use insyd_core::{CreateEventParams, Notification, NotificationId, UserId};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Notifications client for the Insyd API.
pub struct NotificationsClient<'a> {
    http: &'a Client,
    base_url: &'a Url,
    timeout: Duration,
}

impl<'a> NotificationsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// List a user's notifications.
    ///
    /// `GET /notifications/{userId}?onlyUnread={bool}`. Order is whatever
    /// the server returns.
    pub async fn list(&self, user_id: &UserId, only_unread: bool) -> Result<Vec<Notification>> {
        let mut url = self.endpoint(&["notifications", user_id.as_str()])?;
        url.query_pairs_mut()
            .append_pair("onlyUnread", if only_unread { "true" } else { "false" });

        debug!(url = %url, user_id = %user_id, only_unread, "Fetching notifications");

        let notifications: Vec<Notification> =
            self.execute(self.http.get(url), "list notifications").await?;

        info!(
            user_id = %user_id,
            only_unread,
            count = notifications.len(),
            "Fetched notifications"
        );

        Ok(notifications)
    }

    /// Create a notification event.
    ///
    /// `POST /events` with `{userId, type, content}`.
    pub async fn create(&self, params: &CreateEventParams) -> Result<Notification> {
        let url = self.endpoint(&["events"])?;

        debug!(
            url = %url,
            user_id = %params.user_id,
            kind = %params.kind,
            "Creating notification event"
        );

        let notification: Notification = self
            .execute(self.http.post(url).json(params), "create event")
            .await?;

        info!(id = %notification.id, kind = %notification.kind, "Created notification");

        Ok(notification)
    }

    /// Mark a notification as read.
    ///
    /// `PUT /notifications/{id}/read`. Marking an already-read notification
    /// is not an error on our side; the server's answer is returned as-is.
    pub async fn mark_read(&self, id: &NotificationId) -> Result<Notification> {
        let url = self.endpoint(&["notifications", id.as_str(), "read"])?;

        debug!(url = %url, id = %id, "Marking notification as read");

        let request = self
            .http
            .put(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let notification: Notification = self.execute(request, "mark read").await?;

        info!(id = %notification.id, is_read = notification.is_read, "Marked notification as read");

        Ok(notification)
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request and decode a JSON success body.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        operation: &'static str,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            let err = ClientError::from_transport(e, self.timeout);
            error!(operation, error = %err, "Request failed before a response");
            err
        })?;

        let status = response.status().as_u16();

        let body = response.text().await.map_err(|e| {
            let err = ClientError::from_transport(e, self.timeout);
            error!(operation, status, error = %err, "Failed to read response body");
            err
        })?;

        if !(200..300).contains(&status) {
            error!(operation, status, body = %body, "API returned an error status");
            return Err(ClientError::Api { status, body });
        }

        let parsed = serde_json::from_str::<T>(&body);
        parsed.map_err(|e| {
            error!(operation, status, error = %e, "Failed to parse response");
            ClientError::Api { status, body }
        })
    }
}
