//! Core error types for Insyd
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Insyd domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Unknown notification type name
    #[error("Unknown notification type: {0} (expected one of FOLLOW, LIKE, COMMENT, SHARE_JOB, SHARE_BLOG)")]
    UnknownNotificationType(String),
}
