//! In-memory stand-in for the notifications server.

use async_trait::async_trait;
use insyd_client::{ClientError, NotificationApi, Result};
use insyd_core::{CreateEventParams, Notification, NotificationId, NotificationType, UserId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Failure to inject into the next calls.
#[derive(Debug, Clone, Copy)]
pub enum Fault {
    Timeout,
    Api(u16),
}

impl Fault {
    fn into_error(self) -> ClientError {
        match self {
            Fault::Timeout => ClientError::Timeout {
                after: Duration::from_secs(10),
            },
            Fault::Api(status) => ClientError::Api {
                status,
                body: "boom".to_string(),
            },
        }
    }
}

#[derive(Default)]
pub struct FakeServer {
    store: Mutex<Vec<Notification>>,
    fault: Mutex<Option<Fault>>,
    next_id: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
    pub mark_calls: AtomicUsize,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(items: Vec<Notification>) -> Self {
        let server = Self::new();
        *server.store.lock().unwrap() = items;
        server
    }

    pub fn fail_with(&self, fault: Fault) {
        *self.fault.lock().unwrap() = Some(fault);
    }

    pub fn heal(&self) {
        *self.fault.lock().unwrap() = None;
    }

    /// Mark read behind the view's back, as another client would.
    pub fn mark_read_externally(&self, id: &str) {
        for n in self.store.lock().unwrap().iter_mut() {
            if n.id.as_str() == id {
                n.is_read = true;
            }
        }
    }

    pub fn calls(&self) -> (usize, usize, usize) {
        (
            self.list_calls.load(Ordering::SeqCst),
            self.create_calls.load(Ordering::SeqCst),
            self.mark_calls.load(Ordering::SeqCst),
        )
    }

    fn check_fault(&self) -> Result<()> {
        match *self.fault.lock().unwrap() {
            Some(fault) => Err(fault.into_error()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NotificationApi for FakeServer {
    async fn list_notifications(
        &self,
        user_id: &UserId,
        only_unread: bool,
    ) -> Result<Vec<Notification>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fault()?;

        // Newest first.
        Ok(self
            .store
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|n| &n.user_id == user_id && (!only_unread || n.is_unread()))
            .cloned()
            .collect())
    }

    async fn create_notification(&self, params: &CreateEventParams) -> Result<Notification> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fault()?;

        let n = self.next_id.fetch_add(1, Ordering::SeqCst);
        let created = Notification {
            id: NotificationId::new(format!("gen{n}")),
            user_id: params.user_id.clone(),
            kind: params.kind,
            content: params.content.clone(),
            is_read: false,
            created_at: "2024-05-01T10:00:00.000Z".to_string(),
        };
        self.store.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn mark_read(&self, id: &NotificationId) -> Result<Notification> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        self.check_fault()?;

        let mut store = self.store.lock().unwrap();
        let item = store
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| ClientError::Api {
                status: 404,
                body: "Notification not found".to_string(),
            })?;
        item.is_read = true;
        Ok(item.clone())
    }
}

pub fn notification(id: &str, user: &str, kind: NotificationType, read: bool) -> Notification {
    Notification {
        id: NotificationId::new(id),
        user_id: UserId::new(user),
        kind,
        content: kind.sample_content().to_string(),
        is_read: read,
        created_at: "2024-05-01T10:00:00.000Z".to_string(),
    }
}
