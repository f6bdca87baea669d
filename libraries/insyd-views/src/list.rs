//! Notification list screen state.
//!
//! Every operation is split in two: a `begin_*` step that updates local
//! state and returns the request to run, and an `apply_*` step that folds
//! the outcome back in. The async helpers (`load`, `refresh`, `mark_read`)
//! just run both halves back to back; the terminal UI runs the request on
//! a background task instead, so several may be in flight at once. Results
//! are applied in arrival order and the last one to land wins.

use crate::toast::{Toast, ToastSlot};
use insyd_client::{ClientError, NotificationApi};
use insyd_core::{Notification, NotificationId, UserId};
use tracing::{debug, error, info};

pub const LOAD_FAILED: &str = "Failed to load notifications";
pub const MARK_READ_FAILED: &str = "Failed to mark as read";
pub const MARKED_READ: &str = "Marked as read";
pub const REFRESHING: &str = "Refreshing notifications...";

/// A fetch to run against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub user_id: UserId,
    pub only_unread: bool,
}

impl LoadRequest {
    pub async fn run(&self, api: &dyn NotificationApi) -> Result<Vec<Notification>, ClientError> {
        api.list_notifications(&self.user_id, self.only_unread).await
    }
}

/// A mark-read call to run against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkReadRequest {
    pub id: NotificationId,
}

impl MarkReadRequest {
    pub async fn run(&self, api: &dyn NotificationApi) -> Result<Notification, ClientError> {
        api.mark_read(&self.id).await
    }
}

/// Labels of the two filter buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub unread: usize,
}

/// What the content area should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState<'a> {
    Loading,
    Error(&'a str),
    Empty(&'static str),
    Items(&'a [Notification]),
}

/// State of the notification list for one user.
#[derive(Debug)]
pub struct NotificationListView {
    user_id: UserId,
    items: Vec<Notification>,
    in_flight: usize,
    error: Option<String>,
    only_unread: bool,
    selected: usize,
    toast: ToastSlot,
}

impl NotificationListView {
    /// New view for `user_id`, filtered to unread notifications.
    ///
    /// Nothing is fetched until the first `begin_load` / `load`.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            items: Vec::new(),
            in_flight: 0,
            error: None,
            only_unread: true,
            selected: 0,
            toast: ToastSlot::new(),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }

    /// True while at least one fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn only_unread(&self) -> bool {
        self.only_unread
    }

    pub fn toast(&self) -> &ToastSlot {
        &self.toast
    }

    pub fn toast_mut(&mut self) -> &mut ToastSlot {
        &mut self.toast
    }

    /// Number of held notifications that are unread.
    ///
    /// Derived from the held list, so under the unread filter it is simply
    /// the list length.
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| n.is_unread()).count()
    }

    /// Counts shown on the "All" and "Unread" filter buttons.
    pub fn filter_counts(&self) -> FilterCounts {
        let unread = self.unread_count();
        if self.only_unread {
            FilterCounts {
                all: self.items.len() + unread,
                unread: self.items.len(),
            }
        } else {
            FilterCounts {
                all: self.items.len(),
                unread,
            }
        }
    }

    pub fn display_state(&self) -> DisplayState<'_> {
        if self.is_loading() {
            DisplayState::Loading
        } else if let Some(error) = &self.error {
            DisplayState::Error(error)
        } else if self.items.is_empty() {
            DisplayState::Empty(if self.only_unread {
                "No unread notifications"
            } else {
                "No notifications found"
            })
        } else {
            DisplayState::Items(&self.items)
        }
    }

    // ----- fetch -----

    /// Mark a fetch as started and describe it.
    pub fn begin_load(&mut self) -> LoadRequest {
        self.in_flight += 1;
        debug!(user_id = %self.user_id, only_unread = self.only_unread, "Loading notifications");
        LoadRequest {
            user_id: self.user_id.clone(),
            only_unread: self.only_unread,
        }
    }

    /// Fold a fetch outcome into the view.
    ///
    /// On failure the held list is discarded and the error is kept for the
    /// banner.
    pub fn apply_load(
        &mut self,
        request: &LoadRequest,
        result: Result<Vec<Notification>, ClientError>,
    ) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(items) => {
                info!(
                    user_id = %request.user_id,
                    only_unread = request.only_unread,
                    count = items.len(),
                    "Loaded notifications"
                );
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                error!(
                    user_id = %request.user_id,
                    only_unread = request.only_unread,
                    error = %e,
                    "Error loading notifications"
                );
                self.items.clear();
                self.error = Some(e.user_message());
                self.toast.show(Toast::error(LOAD_FAILED));
            }
        }

        self.clamp_selection();
    }

    /// Fetch and apply in one go.
    pub async fn load(&mut self, api: &dyn NotificationApi) {
        let request = self.begin_load();
        let result = request.run(api).await;
        self.apply_load(&request, result);
    }

    /// Change the filter. Returns the reload to run, or `None` if the
    /// filter already had that value.
    pub fn set_only_unread(&mut self, only_unread: bool) -> Option<LoadRequest> {
        if self.only_unread == only_unread {
            return None;
        }
        self.only_unread = only_unread;
        Some(self.begin_load())
    }

    /// Flip the filter and return the reload to run.
    pub fn toggle_filter(&mut self) -> LoadRequest {
        self.only_unread = !self.only_unread;
        self.begin_load()
    }

    /// Change the filter and reload if it changed.
    pub async fn set_filter(&mut self, api: &dyn NotificationApi, only_unread: bool) {
        if let Some(request) = self.set_only_unread(only_unread) {
            let result = request.run(api).await;
            self.apply_load(&request, result);
        }
    }

    /// Start a manual refresh, regardless of whether anything changed.
    pub fn begin_refresh(&mut self) -> LoadRequest {
        let request = self.begin_load();
        self.toast.show(Toast::info(REFRESHING));
        request
    }

    pub async fn refresh(&mut self, api: &dyn NotificationApi) {
        let request = self.begin_refresh();
        let result = request.run(api).await;
        self.apply_load(&request, result);
    }

    // ----- mark read -----

    pub fn begin_mark_read(&self, id: NotificationId) -> MarkReadRequest {
        debug!(id = %id, "Marking notification as read");
        MarkReadRequest { id }
    }

    /// Fold a mark-read outcome into the view.
    ///
    /// Success updates the held list locally without a re-fetch: under the
    /// unread filter the item is dropped, otherwise its read flag is set.
    /// Failure leaves the list alone.
    pub fn apply_mark_read(
        &mut self,
        request: &MarkReadRequest,
        result: Result<Notification, ClientError>,
    ) {
        match result {
            Ok(_) => {
                if self.only_unread {
                    self.items.retain(|n| n.id != request.id);
                } else {
                    for item in self.items.iter_mut().filter(|n| n.id == request.id) {
                        item.is_read = true;
                    }
                }
                self.clamp_selection();
                self.toast.show(Toast::success(MARKED_READ));
            }
            Err(e) => {
                error!(id = %request.id, error = %e, "Error marking as read");
                self.toast.show(Toast::error(MARK_READ_FAILED));
            }
        }
    }

    pub async fn mark_read(&mut self, api: &dyn NotificationApi, id: NotificationId) {
        let request = self.begin_mark_read(id);
        let result = request.run(api).await;
        self.apply_mark_read(&request, result);
    }

    // ----- selection -----

    pub fn selected_index(&self) -> Option<usize> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.selected)
        }
    }

    pub fn selected(&self) -> Option<&Notification> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::Severity;
    use insyd_core::NotificationType;
    use proptest::prelude::*;
    use std::time::Duration;

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            id: NotificationId::new(id),
            user_id: UserId::new("user123"),
            kind: NotificationType::Like,
            content: format!("content {}", id),
            is_read,
            created_at: "2024-05-01T10:00:00.000Z".to_string(),
        }
    }

    fn loaded(only_unread: bool, items: Vec<Notification>) -> NotificationListView {
        let mut view = NotificationListView::new(UserId::new("user123"));
        if !only_unread {
            let request = view.toggle_filter();
            view.apply_load(&request, Ok(Vec::new()));
        }
        let request = view.begin_load();
        view.apply_load(&request, Ok(items));
        view
    }

    fn timeout() -> ClientError {
        ClientError::Timeout {
            after: Duration::from_secs(10),
        }
    }

    #[test]
    fn starts_filtered_to_unread_and_idle() {
        let view = NotificationListView::new(UserId::new("user123"));
        assert!(view.only_unread());
        assert!(!view.is_loading());
        assert_eq!(view.display_state(), DisplayState::Empty("No unread notifications"));
    }

    #[test]
    fn loading_flag_tracks_in_flight_requests() {
        let mut view = NotificationListView::new(UserId::new("user123"));

        let first = view.begin_load();
        let second = view.begin_refresh();
        assert!(view.is_loading());
        assert_eq!(view.display_state(), DisplayState::Loading);

        view.apply_load(&first, Ok(vec![notification("a", false)]));
        assert!(view.is_loading());

        view.apply_load(&second, Ok(vec![notification("b", false)]));
        assert!(!view.is_loading());
        // Last to land wins.
        assert_eq!(view.items()[0].id.as_str(), "b");
    }

    #[test]
    fn failed_load_discards_list_and_shows_error() {
        let mut view = loaded(true, vec![notification("a", false)]);

        let request = view.begin_load();
        view.apply_load(&request, Err(timeout()));

        assert!(view.items().is_empty());
        assert!(view.error().unwrap().contains("check your internet connection"));
        assert!(matches!(view.display_state(), DisplayState::Error(_)));

        let toast = view.toast().current().unwrap();
        assert_eq!(toast.severity(), Severity::Error);
        assert_eq!(toast.message(), LOAD_FAILED);
    }

    #[test]
    fn successful_load_clears_previous_error() {
        let mut view = NotificationListView::new(UserId::new("user123"));
        let request = view.begin_load();
        view.apply_load(&request, Err(timeout()));
        assert!(view.error().is_some());

        let request = view.begin_load();
        view.apply_load(&request, Ok(vec![notification("a", false)]));
        assert!(view.error().is_none());
        assert!(matches!(view.display_state(), DisplayState::Items(_)));
    }

    #[test]
    fn setting_same_filter_does_not_reload() {
        let mut view = NotificationListView::new(UserId::new("user123"));
        assert!(view.set_only_unread(true).is_none());
        assert!(!view.is_loading());

        let request = view.set_only_unread(false).unwrap();
        assert!(!request.only_unread);
        assert!(view.is_loading());
    }

    #[test]
    fn refresh_shows_info_toast() {
        let mut view = NotificationListView::new(UserId::new("user123"));
        let request = view.begin_refresh();

        assert_eq!(request.only_unread, view.only_unread());
        let toast = view.toast().current().unwrap();
        assert_eq!(toast.severity(), Severity::Info);
        assert_eq!(toast.message(), REFRESHING);
    }

    #[test]
    fn mark_read_under_unread_filter_removes_item() {
        let mut view = loaded(true, vec![notification("a", false), notification("b", false)]);

        let request = view.begin_mark_read(NotificationId::new("a"));
        view.apply_mark_read(&request, Ok(notification("a", true)));

        assert_eq!(view.items().len(), 1);
        assert!(view.items().iter().all(|n| n.id.as_str() != "a"));
        assert_eq!(view.toast().current().unwrap().message(), MARKED_READ);
    }

    #[test]
    fn mark_read_under_all_filter_flips_flag() {
        let mut view = loaded(false, vec![notification("a", false), notification("b", true)]);

        let request = view.begin_mark_read(NotificationId::new("a"));
        view.apply_mark_read(&request, Ok(notification("a", true)));

        assert_eq!(view.items().len(), 2);
        assert!(view.items()[0].is_read);
        assert_eq!(view.unread_count(), 0);
    }

    #[test]
    fn failed_mark_read_leaves_list_untouched() {
        let items = vec![notification("a", false), notification("b", false)];
        let mut view = loaded(true, items.clone());

        let request = view.begin_mark_read(NotificationId::new("a"));
        view.apply_mark_read(
            &request,
            Err(ClientError::Api {
                status: 500,
                body: "oops".to_string(),
            }),
        );

        assert_eq!(view.items(), items.as_slice());
        assert!(view.error().is_none());
        let toast = view.toast().current().unwrap();
        assert_eq!(toast.severity(), Severity::Error);
        assert_eq!(toast.message(), MARK_READ_FAILED);
    }

    #[test]
    fn filter_counts_under_each_filter() {
        let view = loaded(true, vec![notification("a", false), notification("b", false)]);
        assert_eq!(view.filter_counts(), FilterCounts { all: 4, unread: 2 });

        let view = loaded(
            false,
            vec![notification("a", false), notification("b", true), notification("c", true)],
        );
        assert_eq!(view.filter_counts(), FilterCounts { all: 3, unread: 1 });
    }

    #[test]
    fn selection_is_clamped_after_removal() {
        let mut view = loaded(true, vec![notification("a", false), notification("b", false)]);
        view.select_next();
        view.select_next();
        assert_eq!(view.selected().unwrap().id.as_str(), "b");

        let request = view.begin_mark_read(NotificationId::new("b"));
        view.apply_mark_read(&request, Ok(notification("b", true)));
        assert_eq!(view.selected().unwrap().id.as_str(), "a");

        let request = view.begin_mark_read(NotificationId::new("a"));
        view.apply_mark_read(&request, Ok(notification("a", true)));
        assert_eq!(view.selected_index(), None);
        view.select_previous();
        assert!(view.selected().is_none());
    }

    fn items_strategy() -> impl Strategy<Value = Vec<Notification>> {
        prop::collection::vec(any::<bool>(), 0..20).prop_map(|flags| {
            flags
                .into_iter()
                .enumerate()
                .map(|(i, is_read)| notification(&format!("n{}", i), is_read))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn unread_count_matches_held_list(items in items_strategy()) {
            let expected = items.iter().filter(|n| !n.is_read).count();
            let view = loaded(false, items);
            prop_assert_eq!(view.unread_count(), expected);
        }

        #[test]
        fn mark_read_keeps_filter_invariants(items in items_strategy(), pick in any::<prop::sample::Index>()) {
            prop_assume!(!items.is_empty());
            let target = items[pick.index(items.len())].id.clone();
            let len = items.len();

            // Only unread: the item disappears.
            let unread: Vec<Notification> = items.iter().filter(|n| !n.is_read).cloned().collect();
            let mut view = loaded(true, unread);
            let request = view.begin_mark_read(target.clone());
            view.apply_mark_read(&request, Ok(notification(target.as_str(), true)));
            prop_assert!(view.items().iter().all(|n| n.id != target));
            prop_assert!(view.items().iter().all(|n| !n.is_read));
            prop_assert_eq!(view.unread_count(), view.items().len());

            // All: the item stays, now read.
            let mut view = loaded(false, items);
            let request = view.begin_mark_read(target.clone());
            view.apply_mark_read(&request, Ok(notification(target.as_str(), true)));
            prop_assert_eq!(view.items().len(), len);
            let item = view.items().iter().find(|n| n.id == target).unwrap();
            prop_assert!(item.is_read);
        }
    }
}
