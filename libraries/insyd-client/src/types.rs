//! Client configuration.

use std::time::Duration;

/// Deadline applied to every request unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Deadline for establishing the TCP/TLS connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for connecting to the notifications API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL including any path prefix (e.g., "https://api.example.com/api")
    pub url: String,
    /// Whole-request deadline
    pub timeout: Duration,
    /// Connection deadline
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Create a new config with default timeouts.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Override the whole-request deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the connection deadline.
    #[must_use]
    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}
