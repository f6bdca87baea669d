//! Event creation form state.

use crate::toast::{Toast, ToastSlot};
use insyd_client::{ClientError, NotificationApi};
use insyd_core::{CreateEventParams, Notification, NotificationType, UserId};
use tracing::{debug, error, info, warn};

pub const MISSING_FIELDS: &str = "Please fill in all required fields";
pub const EVENT_CREATED: &str = "Event created successfully!";

/// Form field that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    UserId,
    Type,
    Content,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::UserId => FormField::Type,
            FormField::Type => FormField::Content,
            FormField::Content => FormField::UserId,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::UserId => FormField::Content,
            FormField::Type => FormField::UserId,
            FormField::Content => FormField::Type,
        }
    }
}

/// A create call to run against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub params: CreateEventParams,
}

impl SubmitRequest {
    pub async fn run(&self, api: &dyn NotificationApi) -> Result<Notification, ClientError> {
        api.create_notification(&self.params).await
    }
}

/// Controlled form for posting a synthetic notification event.
#[derive(Debug)]
pub struct EventFormView {
    default_user_id: UserId,
    user_id: String,
    kind: NotificationType,
    content: String,
    submitting: bool,
    focus: FormField,
    toast: ToastSlot,
}

impl EventFormView {
    /// New form pre-filled for `default_user_id` with the first type and
    /// its sample content.
    pub fn new(default_user_id: UserId) -> Self {
        let kind = NotificationType::default();
        Self {
            user_id: default_user_id.as_str().to_string(),
            default_user_id,
            kind,
            content: kind.sample_content().to_string(),
            submitting: false,
            focus: FormField::default(),
            toast: ToastSlot::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn kind(&self) -> NotificationType {
        self.kind
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn toast(&self) -> &ToastSlot {
        &self.toast
    }

    pub fn toast_mut(&mut self) -> &mut ToastSlot {
        &mut self.toast
    }

    /// Whether the submit action is available.
    pub fn can_submit(&self) -> bool {
        !self.submitting && self.is_complete()
    }

    fn is_complete(&self) -> bool {
        !self.user_id.trim().is_empty() && !self.content.trim().is_empty()
    }

    // ----- editing -----

    pub fn set_user_id(&mut self, user_id: impl Into<String>) {
        self.user_id = user_id.into();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Pick a type; the content is replaced by that type's sample.
    pub fn select_type(&mut self, kind: NotificationType) {
        self.kind = kind;
        self.content = kind.sample_content().to_string();
    }

    pub fn next_type(&mut self) {
        self.select_type(self.kind.next());
    }

    pub fn previous_type(&mut self) {
        self.select_type(self.kind.previous());
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Type a character into the focused text field.
    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::UserId => self.user_id.push(c),
            FormField::Content => self.content.push(c),
            FormField::Type => {}
        }
    }

    /// Delete the last character of the focused text field.
    pub fn backspace(&mut self) {
        match self.focus {
            FormField::UserId => {
                self.user_id.pop();
            }
            FormField::Content => {
                self.content.pop();
            }
            FormField::Type => {}
        }
    }

    /// Restore every draft field to its initial value.
    pub fn reset(&mut self) {
        self.user_id = self.default_user_id.as_str().to_string();
        self.select_type(NotificationType::default());
    }

    // ----- submit -----

    /// Validate and start a submission.
    ///
    /// Returns `None` without touching the network when a submission is
    /// already in flight, or when the user id or content is blank (an error
    /// toast is shown in that case and the form stays submittable).
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.submitting {
            debug!("Submission already in flight, ignoring");
            return None;
        }

        if !self.is_complete() {
            warn!("Event form is missing required fields");
            self.toast.show(Toast::error(MISSING_FIELDS));
            return None;
        }

        self.submitting = true;
        let params = CreateEventParams::new(
            self.user_id.trim(),
            self.kind,
            self.content.trim(),
        );
        debug!(user_id = %params.user_id, kind = %params.kind, "Submitting event");

        Some(SubmitRequest { params })
    }

    /// Fold a submission outcome into the form.
    ///
    /// Success resets the drafts; failure keeps them so the operator can
    /// correct and retry.
    pub fn apply_submit(
        &mut self,
        request: &SubmitRequest,
        result: Result<Notification, ClientError>,
    ) -> Option<Notification> {
        self.submitting = false;

        match result {
            Ok(notification) => {
                info!(
                    id = %notification.id,
                    user_id = %request.params.user_id,
                    kind = %request.params.kind,
                    "Event created"
                );
                self.reset();
                self.toast.show(Toast::success(EVENT_CREATED));
                Some(notification)
            }
            Err(e) => {
                error!(user_id = %request.params.user_id, error = %e, "Error creating event");
                self.toast.show(Toast::error(e.user_message()));
                None
            }
        }
    }

    /// Validate, post, and apply in one go.
    ///
    /// Returns the created notification, or `None` if the submission was
    /// blocked or failed (the toast says which).
    pub async fn submit(&mut self, api: &dyn NotificationApi) -> Option<Notification> {
        let request = self.begin_submit()?;
        let result = request.run(api).await;
        self.apply_submit(&request, result)
    }
}
