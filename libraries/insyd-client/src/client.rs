//! Main Insyd notifications client.

use crate::api::NotificationApi;
use crate::error::{ClientError, Result};
use crate::notifications::NotificationsClient;
use crate::types::ClientConfig;
use async_trait::async_trait;
use insyd_core::{CreateEventParams, Notification, NotificationId, UserId};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Main client for the notifications API.
///
/// Holds one pooled HTTP client configured with the request deadline; the
/// per-resource calls live on [`NotificationsClient`].
///
/// # Example
///
/// ```ignore
/// use insyd_client::{ClientConfig, InsydClient};
///
/// let client = InsydClient::new(ClientConfig::new("http://localhost:3000/api"))?;
/// let items = client.notifications().list(&"user123".into(), false).await?;
/// ```
#[derive(Debug, Clone)]
pub struct InsydClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl InsydClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        // Validate URL
        if config.url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Normalize URL
        let url = config.url.trim().trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let base_url =
            Url::parse(&url).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(format!("{} cannot be a base URL", url)));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .user_agent(format!("insyd-client/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        debug!(url = %base_url, timeout = ?config.timeout, "Created notifications client");

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
        })
    }

    /// The normalized base URL, without a trailing slash.
    pub fn url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// The whole-request deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get a notifications client for list/create/mark-read calls.
    pub fn notifications(&self) -> NotificationsClient<'_> {
        NotificationsClient::new(&self.http, &self.base_url, self.timeout)
    }
}

#[async_trait]
impl NotificationApi for InsydClient {
    async fn list_notifications(
        &self,
        user_id: &UserId,
        only_unread: bool,
    ) -> Result<Vec<Notification>> {
        self.notifications().list(user_id, only_unread).await
    }

    async fn create_notification(&self, params: &CreateEventParams) -> Result<Notification> {
        self.notifications().create(params).await
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<Notification> {
        self.notifications().mark_read(id).await
    }
}
