//! One-shot commands.
//!
//! Each command drives the same view state as the terminal UI, then prints
//! whatever toast the view ended up showing: success and info go to stdout,
//! errors to stderr.

use crate::config::Profile;
use chrono::Utc;
use clap::{Parser, Subcommand};
use insyd_client::NotificationApi;
use insyd_core::{relative_time, Notification, NotificationId, NotificationType, UserId};
use insyd_views::{DisplayState, EventFormView, NotificationListView, Severity, ToastSlot};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "insyd")]
#[command(about = "Insyd notifications terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file path (defaults to ./insyd.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL, overriding the profile
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API profile: development or production
    #[arg(long, global = true)]
    pub profile: Option<Profile>,

    /// Verbose logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive terminal UI (the default)
    Tui,
    /// Print notifications
    List {
        /// Include read notifications
        #[arg(short, long)]
        all: bool,
        /// User to list for, instead of the session user
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Mark a notification as read
    MarkRead {
        /// Notification id
        id: String,
    },
    /// Create a notification event
    Create {
        /// Recipient, instead of the session user
        #[arg(short, long)]
        user: Option<String>,
        /// FOLLOW, LIKE, COMMENT, SHARE_JOB or SHARE_BLOG
        #[arg(short = 't', long = "type", default_value_t = NotificationType::default())]
        kind: NotificationType,
        /// Message text (defaults to the type's sample)
        #[arg(long)]
        content: Option<String>,
    },
}

/// Whether a command did what was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
}

impl Outcome {
    fn from_toast(slot: &ToastSlot) -> Self {
        match slot.current().map(|t| t.severity()) {
            Some(Severity::Error) => Outcome::Failed,
            _ => Outcome::Succeeded,
        }
    }
}

/// Command output sinks.
pub struct Printer<O, E> {
    pub out: O,
    pub err: E,
}

impl Printer<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl<O: Write, E: Write> Printer<O, E> {
    /// Print the slot's toast, if any, to the stream matching its severity.
    pub fn toast(&mut self, slot: &ToastSlot) -> io::Result<()> {
        let Some(toast) = slot.current() else {
            return Ok(());
        };
        match toast.severity() {
            Severity::Error => writeln!(self.err, "{}", toast.message()),
            Severity::Success | Severity::Info => writeln!(self.out, "{}", toast.message()),
        }
    }
}

/// One line per notification: read marker, glyph, type, content, age, id.
pub fn format_notification(notification: &Notification) -> String {
    let marker = if notification.is_read { ' ' } else { '*' };
    format!(
        "{} {} {:<10} {}  ({})  [{}]",
        marker,
        notification.kind.glyph(),
        notification.kind.as_str(),
        notification.content,
        relative_time(&notification.created_at, Utc::now()),
        notification.id
    )
}

pub async fn list<O: Write, E: Write>(
    api: &dyn NotificationApi,
    user_id: UserId,
    all: bool,
    printer: &mut Printer<O, E>,
) -> io::Result<Outcome> {
    let mut view = NotificationListView::new(user_id);
    if all {
        view.set_filter(api, false).await;
    } else {
        view.load(api).await;
    }

    match view.display_state() {
        DisplayState::Items(items) => {
            for notification in items {
                writeln!(printer.out, "{}", format_notification(notification))?;
            }
            writeln!(printer.out, "{} unread", view.unread_count())?;
        }
        DisplayState::Empty(message) => writeln!(printer.out, "{}", message)?,
        DisplayState::Error(message) => writeln!(printer.err, "{}", message)?,
        DisplayState::Loading => {}
    }

    printer.toast(view.toast())?;
    Ok(Outcome::from_toast(view.toast()))
}

pub async fn mark_read<O: Write, E: Write>(
    api: &dyn NotificationApi,
    user_id: UserId,
    id: NotificationId,
    printer: &mut Printer<O, E>,
) -> io::Result<Outcome> {
    let mut view = NotificationListView::new(user_id);
    view.mark_read(api, id).await;

    printer.toast(view.toast())?;
    Ok(Outcome::from_toast(view.toast()))
}

pub async fn create<O: Write, E: Write>(
    api: &dyn NotificationApi,
    session_user: UserId,
    user: Option<String>,
    kind: NotificationType,
    content: Option<String>,
    printer: &mut Printer<O, E>,
) -> io::Result<Outcome> {
    let mut form = EventFormView::new(session_user);
    if let Some(user) = user {
        form.set_user_id(user);
    }
    form.select_type(kind);
    if let Some(content) = content {
        form.set_content(content);
    }

    let created = form.submit(api).await;
    printer.toast(form.toast())?;

    if let Some(notification) = created {
        writeln!(printer.out, "{}", format_notification(&notification))?;
    }

    Ok(Outcome::from_toast(form.toast()))
}
