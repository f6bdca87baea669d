use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use insyd_client::{ClientError, NotificationApi};
use insyd_core::{Notification, UserId};
use insyd_views::{
    EventFormView, FormField, Header, LoadRequest, MarkReadRequest, NotificationListView, Screen,
    SubmitRequest, ToastId, ToastSlot, ToastTimer,
};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::Instant;
use tracing::debug;

/// Something that finished off the event loop and needs applying to the views.
#[derive(Debug)]
pub enum AppEvent {
    Loaded {
        request: LoadRequest,
        result: Result<Vec<Notification>, ClientError>,
    },
    MarkedRead {
        request: MarkReadRequest,
        result: Result<Notification, ClientError>,
    },
    Submitted {
        request: SubmitRequest,
        result: Result<Notification, ClientError>,
    },
    ToastExpired {
        screen: Screen,
        id: ToastId,
    },
}

/// Keeps a view's auto-dismiss timer in step with its toast slot.
#[derive(Debug, Default)]
struct ToastDriver {
    timer: ToastTimer,
    armed: Option<ToastId>,
}

impl ToastDriver {
    fn sync(&mut self, slot: &ToastSlot, screen: Screen, tx: &UnboundedSender<AppEvent>) {
        match slot.current() {
            Some(toast) if self.armed != Some(toast.id()) => {
                self.armed = Some(toast.id());
                let tx = tx.clone();
                self.timer.schedule(toast, move |id| {
                    let _ = tx.send(AppEvent::ToastExpired { screen, id });
                });
            }
            Some(_) => {}
            None => {
                self.armed = None;
                self.timer.cancel();
            }
        }
    }
}

pub struct App {
    api: Arc<dyn NotificationApi>,
    tx: UnboundedSender<AppEvent>,
    header: Header,
    list: NotificationListView,
    form: EventFormView,
    list_toast: ToastDriver,
    form_toast: ToastDriver,
    should_quit: bool,
}

impl App {
    pub fn new(api: Arc<dyn NotificationApi>, user_id: UserId, tx: UnboundedSender<AppEvent>) -> Self {
        Self {
            api,
            tx,
            header: Header::new(),
            list: NotificationListView::new(user_id.clone()),
            form: EventFormView::new(user_id),
            list_toast: ToastDriver::default(),
            form_toast: ToastDriver::default(),
            should_quit: false,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn list(&self) -> &NotificationListView {
        &self.list
    }

    pub fn form(&self) -> &EventFormView {
        &self.form
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Kick off the first fetch.
    pub fn start(&mut self) {
        let request = self.list.begin_load();
        self.spawn_load(request);
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        self.list.toast_mut().expire(now);
        self.form.toast_mut().expire(now);
        self.sync_toasts();
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Loaded { request, result } => self.list.apply_load(&request, result),
            AppEvent::MarkedRead { request, result } => {
                self.list.apply_mark_read(&request, result);
            }
            AppEvent::Submitted { request, result } => {
                self.form.apply_submit(&request, result);
            }
            AppEvent::ToastExpired { screen, id } => {
                self.slot_mut(screen).dismiss_id(id);
            }
        }
        self.sync_toasts();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::F(1) => self.switch_to(Screen::Notifications),
            KeyCode::F(2) => self.switch_to(Screen::CreateEvent),
            _ => match self.header.active() {
                Screen::Notifications => self.handle_list_key(key),
                Screen::CreateEvent => self.handle_form_key(key),
            },
        }
        self.sync_toasts();
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.switch_to(Screen::CreateEvent),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.list.select_previous(),
            KeyCode::Char('f') => {
                let request = self.list.toggle_filter();
                self.spawn_load(request);
            }
            KeyCode::Char('a') => self.set_filter(false),
            KeyCode::Char('u') => self.set_filter(true),
            KeyCode::Char('r') => {
                let request = self.list.begin_refresh();
                self.spawn_load(request);
            }
            KeyCode::Enter | KeyCode::Char('m') => self.mark_selected_read(),
            KeyCode::Esc => {
                self.list.toast_mut().dismiss();
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_previous(),
            KeyCode::Left if self.form.focus() == FormField::Type => self.form.previous_type(),
            KeyCode::Right if self.form.focus() == FormField::Type => self.form.next_type(),
            KeyCode::Enter => {
                if let Some(request) = self.form.begin_submit() {
                    self.spawn_submit(request);
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            // Ctrl/Alt chords are shortcuts, not text
            KeyCode::Char(c) if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() => {
                self.form.insert_char(c)
            }
            KeyCode::Esc => {
                if !self.form.toast_mut().dismiss() {
                    self.switch_to(Screen::Notifications);
                }
            }
            _ => {}
        }
    }

    /// Entering the list screen reloads it, as mounting it does.
    fn switch_to(&mut self, screen: Screen) {
        if self.header.select(screen) {
            debug!(screen = screen.label(), "Switched screen");
            if screen == Screen::Notifications {
                let request = self.list.begin_load();
                self.spawn_load(request);
            }
        }
    }

    fn set_filter(&mut self, only_unread: bool) {
        if let Some(request) = self.list.set_only_unread(only_unread) {
            self.spawn_load(request);
        }
    }

    /// Read notifications offer no mark-read action.
    fn mark_selected_read(&mut self) {
        let Some(selected) = self.list.selected().filter(|n| n.is_unread()) else {
            return;
        };
        let request = self.list.begin_mark_read(selected.id.clone());
        self.spawn_mark_read(request);
    }

    fn slot_mut(&mut self, screen: Screen) -> &mut ToastSlot {
        match screen {
            Screen::Notifications => self.list.toast_mut(),
            Screen::CreateEvent => self.form.toast_mut(),
        }
    }

    fn sync_toasts(&mut self) {
        self.list_toast
            .sync(self.list.toast(), Screen::Notifications, &self.tx);
        self.form_toast
            .sync(self.form.toast(), Screen::CreateEvent, &self.tx);
    }

    fn spawn_load(&self, request: LoadRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = request.run(api.as_ref()).await;
            let _ = tx.send(AppEvent::Loaded { request, result });
        });
    }

    fn spawn_mark_read(&self, request: MarkReadRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = request.run(api.as_ref()).await;
            let _ = tx.send(AppEvent::MarkedRead { request, result });
        });
    }

    fn spawn_submit(&self, request: SubmitRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = request.run(api.as_ref()).await;
            let _ = tx.send(AppEvent::Submitted { request, result });
        });
    }
}
