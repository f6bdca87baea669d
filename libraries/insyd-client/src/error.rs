//! Error types for the Insyd client.

use std::time::Duration;
use thiserror::Error;

/// Message shown to the operator when a request hits the client deadline.
pub const TIMEOUT_MESSAGE: &str = "Request timeout - please check your internet connection";

/// Errors that can occur when talking to the notifications API.
#[derive(Error, Debug)]
pub enum ClientError {
    /// No response arrived before the client-side deadline
    #[error("Request timeout after {after:?} - please check your internet connection")]
    Timeout { after: Duration },

    /// Transport failed before any HTTP response (DNS, refused, TLS)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A response arrived but was not a usable success.
    ///
    /// Either the status was non-2xx, or the body of a 2xx response was not
    /// the JSON we expected. `body` is the raw response text in both cases.
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Invalid base URL in the client configuration
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Classify a transport error: deadline hits are timeouts, the rest are
    /// network failures.
    pub(crate) fn from_transport(err: reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            ClientError::Timeout { after: deadline }
        } else {
            ClientError::Network(err)
        }
    }

    /// Text suitable for a toast or an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Timeout { .. } => TIMEOUT_MESSAGE.to_string(),
            ClientError::Network(_) => "Network error".to_string(),
            ClientError::Api { status, body } if body.is_empty() => {
                format!("Request failed: {}", status)
            }
            ClientError::Api { status, body } => format!("Request failed: {} {}", status, body),
            ClientError::InvalidUrl(msg) => format!("Invalid server URL: {}", msg),
        }
    }

    /// Whether the client deadline elapsed
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Timeout { .. })
    }

    /// Whether the transport failed before a response
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// HTTP status of the response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct() {
        let timeout = ClientError::Timeout {
            after: Duration::from_secs(10),
        };
        let api = ClientError::Api {
            status: 500,
            body: "boom".to_string(),
        };

        assert_eq!(timeout.user_message(), TIMEOUT_MESSAGE);
        assert_eq!(api.user_message(), "Request failed: 500 boom");
        assert_ne!(timeout.user_message(), api.user_message());
    }

    #[test]
    fn test_api_message_without_body() {
        let api = ClientError::Api {
            status: 404,
            body: String::new(),
        };
        assert_eq!(api.user_message(), "Request failed: 404");
        assert_eq!(api.status(), Some(404));
    }

    #[test]
    fn test_kind_helpers() {
        let timeout = ClientError::Timeout {
            after: Duration::from_millis(10),
        };
        assert!(timeout.is_timeout());
        assert!(!timeout.is_network());
        assert_eq!(timeout.status(), None);
    }
}
