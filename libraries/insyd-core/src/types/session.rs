/// Current-user context
use super::UserId;

/// User the client acts for when nothing else is configured.
pub const DEFAULT_USER_ID: &str = "user123";

/// Process-wide current-user context.
///
/// Stands in for an authenticated session: the notification list is scoped
/// to this user and the event form pre-fills it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: UserId,
}

impl Session {
    /// Create a session for the given user
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    /// The current user
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}
