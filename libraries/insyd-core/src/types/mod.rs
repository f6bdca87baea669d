//! Domain types for Insyd

mod ids;
mod notification;
mod session;

pub use ids::{NotificationId, UserId};
pub use notification::{CreateEventParams, Notification, NotificationType};
pub use session::{Session, DEFAULT_USER_ID};
