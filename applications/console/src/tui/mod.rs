//! Interactive terminal UI.
//!
//! One loop owns all view state. Network calls run on spawned tasks and
//! report back over a channel, so the screen stays live while requests are
//! in flight.

mod app;
mod ui;

pub use app::{App, AppEvent};

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use insyd_client::NotificationApi;
use insyd_core::Session;
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

/// Redraw period, so relative times and toast expiry stay current.
const TICK: Duration = Duration::from_millis(250);

pub async fn run(api: Arc<dyn NotificationApi>, session: Session) -> Result<()> {
    enable_raw_mode()?;
    // Restores the terminal on every exit from here on, panics included
    let _restore = RestoreGuard::new(restore_terminal);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    info!(user_id = %session.user_id(), "Starting terminal UI");
    event_loop(&mut terminal, api, session).await
}

fn restore_terminal() {
    if let Err(e) = disable_raw_mode() {
        warn!("Failed to disable raw mode: {}", e);
    }
    if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
        warn!("Failed to leave alternate screen: {}", e);
    }
}

/// Runs its action once when dropped.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    api: Arc<dyn NotificationApi>,
    session: Session,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new(api, session.user_id().clone(), tx);
    app.start();

    let mut events = EventStream::new();
    let mut tick = interval(TICK);

    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        tokio::select! {
            _ = tick.tick() => app.on_tick(),
            Some(event) = rx.recv() => app.handle_event(event),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
        }

        if app.should_quit() {
            break;
        }
    }

    info!("Terminal UI closed");
    Ok(())
}
