//! Insyd Notifications Client
//!
//! HTTP client library for the Insyd notifications API.
//!
//! # Features
//!
//! - **List**: fetch a user's notifications, optionally only unread ones
//! - **Create**: post a synthetic notification event
//! - **Mark read**: flip a notification's read flag
//!
//! Every request is bounded by a client-side timeout (10 seconds unless
//! configured otherwise). Failures come back as one of three kinds:
//! [`ClientError::Timeout`], [`ClientError::Network`] or [`ClientError::Api`].
//!
//! # Example
//!
//! ```ignore
//! use insyd_client::{ClientConfig, InsydClient, NotificationApi};
//! use insyd_core::UserId;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = InsydClient::new(ClientConfig::new("https://api-node-insyd.onrender.com/api"))?;
//!
//!     let unread = client
//!         .list_notifications(&UserId::new("user123"), true)
//!         .await?;
//!     println!("{} unread notifications", unread.len());
//!
//!     if let Some(first) = unread.first() {
//!         client.mark_read(&first.id).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

mod api;
mod client;
mod error;
mod notifications;
mod types;

// Re-export main types
pub use api::NotificationApi;
pub use client::InsydClient;
pub use error::{ClientError, Result};
pub use types::{ClientConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT};

// Re-export the sub-client for direct use if needed
pub use notifications::NotificationsClient;
