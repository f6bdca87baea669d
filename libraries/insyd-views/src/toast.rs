//! Transient status banner.
//!
//! Each view owns one [`ToastSlot`]. Showing a toast replaces whatever is
//! currently displayed (no queueing). A toast expires once its duration has
//! elapsed; [`ToastTimer`] drives that expiry from the async runtime.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::trace;

/// How long a toast stays up unless told otherwise.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(2500);

/// Unique identifier for a shown toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToastId(u64);

impl ToastId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Severity tag, drives styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed
    Success,
    /// Operation failed
    Error,
    /// Neutral status
    #[default]
    Info,
}

impl Severity {
    /// Lowercase tag (`success`, `error`, `info`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

/// A status message with a display deadline.
#[derive(Debug, Clone)]
pub struct Toast {
    id: ToastId,
    message: String,
    severity: Severity,
    duration: Duration,
    shown_at: Instant,
}

impl Toast {
    /// Create a toast starting now, with the default duration.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            id: ToastId::next(),
            message: message.into(),
            severity,
            duration: DEFAULT_TOAST_DURATION,
            shown_at: Instant::now(),
        }
    }

    /// Creates a success toast.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    /// Creates an error toast.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Creates an info toast.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Override the display duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn id(&self) -> ToastId {
        self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Instant after which the toast is no longer displayed.
    pub fn deadline(&self) -> Instant {
        self.shown_at + self.duration
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline()
    }
}

/// The single toast position of a view.
#[derive(Debug, Default)]
pub struct ToastSlot {
    current: Option<Toast>,
}

impl ToastSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast, replacing the current one.
    pub fn show(&mut self, toast: Toast) -> ToastId {
        let id = toast.id();
        trace!(severity = toast.severity().as_str(), message = toast.message(), "Showing toast");
        self.current = Some(toast);
        id
    }

    /// The held toast, expired or not.
    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    /// The toast to display at `now`, if any.
    pub fn visible(&self, now: Instant) -> Option<&Toast> {
        self.current.as_ref().filter(|t| !t.is_expired(now))
    }

    /// Dismiss whatever is shown. Returns `false` if nothing was.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    /// Dismiss only if `id` is still the toast on display.
    ///
    /// A dismissal addressed to a replaced toast is ignored.
    pub fn dismiss_id(&mut self, id: ToastId) -> bool {
        if self.current.as_ref().is_some_and(|t| t.id() == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Drop the current toast if its deadline has passed.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|t| t.is_expired(now)) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

/// Pending auto-dismiss for one view's toast.
///
/// At most one dismiss task is alive: scheduling a new toast, or cancelling,
/// aborts the previous one so it can never fire against a newer toast.
#[derive(Debug, Default)]
pub struct ToastTimer {
    pending: Option<JoinHandle<()>>,
}

impl ToastTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `on_expire` with the toast's id once its deadline passes.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, toast: &Toast, on_expire: F)
    where
        F: FnOnce(ToastId) + Send + 'static,
    {
        self.cancel();

        let id = toast.id();
        let deadline = toast.deadline();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            on_expire(id);
        }));
    }

    /// Abort the pending dismiss, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for ToastTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
