//! Insyd Views
//!
//! View state for the Insyd notifications client, independent of any
//! rendering toolkit.
//!
//! # Views
//!
//! - [`NotificationListView`]: the notification list with its unread filter,
//!   optimistic mark-read, and refresh
//! - [`EventFormView`]: the form for posting a synthetic event
//! - [`Header`]: screen navigation
//!
//! Each view owns a [`ToastSlot`] holding at most one transient status
//! message. Front-ends pair it with a [`ToastTimer`] to auto-dismiss.
//!
//! Every network-backed action comes in two halves: a synchronous `begin_*`
//! that updates local state and returns a request, and an `apply_*` that folds
//! the outcome back in. The async convenience methods (`load`, `mark_read`,
//! `submit`, ...) run both halves back to back. Front-ends that must stay
//! responsive while a request is in flight drive the halves themselves.
//!
//! # Example
//!
//! ```rust,no_run
//! use insyd_client::{ClientConfig, InsydClient};
//! use insyd_core::UserId;
//! use insyd_views::NotificationListView;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InsydClient::new(ClientConfig::new("http://localhost:3000/api"))?;
//! let mut view = NotificationListView::new(UserId::new("user123"));
//!
//! view.load(&client).await;
//! println!("{} unread", view.unread_count());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod create;
pub mod header;
pub mod list;
pub mod toast;

pub use create::{EventFormView, FormField, SubmitRequest};
pub use header::{Header, Screen};
pub use list::{DisplayState, FilterCounts, LoadRequest, MarkReadRequest, NotificationListView};
pub use toast::{Severity, Toast, ToastId, ToastSlot, ToastTimer, DEFAULT_TOAST_DURATION};
