//! Insyd Core
//!
//! Platform-agnostic domain types for the Insyd notifications client.
//!
//! This crate provides the building blocks shared by the HTTP client, the
//! view layer, and the console application.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Notification`, `NotificationType`, `CreateEventParams`
//! - **Identifiers**: `UserId`, `NotificationId`
//! - **Session**: the process-wide current-user context
//! - **Error Handling**: `CoreError` and `Result`
//!
//! # Example
//!
//! ```rust
//! use insyd_core::{CreateEventParams, NotificationType, Session};
//!
//! let session = Session::default();
//! let params = CreateEventParams::new(
//!     session.user_id().clone(),
//!     NotificationType::Like,
//!     NotificationType::Like.sample_content(),
//! );
//!
//! assert_eq!(params.user_id.as_str(), "user123");
//! assert_eq!(params.content, "Bob liked your post");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod time;
pub mod types;

pub use error::{CoreError, Result};
pub use time::relative_time;
pub use types::{
    CreateEventParams, Notification, NotificationId, NotificationType, Session, UserId,
    DEFAULT_USER_ID,
};
