use super::app::App;
use chrono::Utc;
use insyd_core::{relative_time, Notification};
use insyd_views::{
    DisplayState, EventFormView, FormField, NotificationListView, Screen, Severity, Toast,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use tokio::time::Instant;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    let now = Instant::now();
    let toast = match app.header().active() {
        Screen::Notifications => {
            draw_list(f, app.list(), chunks[1]);
            app.list().toast().visible(now)
        }
        Screen::CreateEvent => {
            draw_form(f, app.form(), chunks[1]);
            app.form().toast().visible(now)
        }
    };

    if let Some(toast) = toast {
        draw_toast(f, toast, chunks[2]);
    }
    draw_hints(f, app.header().active(), chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let header = app.header();
    let titles: Vec<Line> = header.tabs().map(|(label, _)| Line::from(label)).collect();

    let tabs = Tabs::new(titles)
        .select(header.active().index())
        .block(
            Block::default().borders(Borders::ALL).title(Span::styled(
                header.title(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, area);
}

fn draw_list(f: &mut Frame, view: &NotificationListView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let counts = view.filter_counts();
    let button = |label: String, active: bool| {
        if active {
            Span::styled(
                format!("[{}]", label),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            )
        } else {
            Span::raw(format!(" {} ", label))
        }
    };
    let toolbar = Line::from(vec![
        button(format!("All ({})", counts.all), !view.only_unread()),
        Span::raw(" "),
        button(format!("Unread ({})", counts.unread), view.only_unread()),
        Span::raw("   "),
        Span::styled(
            format!("{} unread", view.unread_count()),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ]);
    f.render_widget(Paragraph::new(toolbar), chunks[0]);

    let block = Block::default().borders(Borders::ALL).title("Notifications");
    match view.display_state() {
        DisplayState::Loading => {
            let p = Paragraph::new("Loading notifications...").block(block);
            f.render_widget(p, chunks[1]);
        }
        DisplayState::Error(message) => {
            let p = Paragraph::new(Line::from(vec![
                Span::styled("Error: ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::raw(message),
            ]))
            .wrap(Wrap { trim: true })
            .block(block);
            f.render_widget(p, chunks[1]);
        }
        DisplayState::Empty(message) => {
            let p = Paragraph::new(Span::styled(message, Style::default().add_modifier(Modifier::DIM)))
                .block(block);
            f.render_widget(p, chunks[1]);
        }
        DisplayState::Items(items) => {
            let list = List::new(items.iter().map(notification_item).collect::<Vec<_>>())
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default().with_selected(view.selected_index());
            f.render_stateful_widget(list, chunks[1], &mut state);
        }
    }
}

fn notification_item(notification: &Notification) -> ListItem<'_> {
    let content_style = if notification.is_read {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut spans = vec![
        Span::raw(format!("{} ", notification.kind.glyph())),
        Span::styled(
            format!("{:<11}", notification.kind.label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(notification.content.as_str(), content_style),
        Span::styled(
            format!("  {}", relative_time(&notification.created_at, Utc::now())),
            Style::default().add_modifier(Modifier::DIM),
        ),
    ];
    if notification.is_unread() {
        spans.push(Span::styled("  ●", Style::default().fg(Color::Blue)));
    }

    ListItem::new(Line::from(spans))
}

fn draw_form(f: &mut Frame, form: &EventFormView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let field_block = |title: &'static str, field: FormField| {
        let style = if form.focus() == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title)
    };

    f.render_widget(
        Paragraph::new(form.user_id()).block(field_block("User ID", FormField::UserId)),
        chunks[0],
    );

    let kind = form.kind();
    f.render_widget(
        Paragraph::new(format!("< {} {} >", kind.glyph(), kind.label()))
            .block(field_block("Notification Type", FormField::Type)),
        chunks[1],
    );

    f.render_widget(
        Paragraph::new(form.content())
            .wrap(Wrap { trim: false })
            .block(field_block("Content", FormField::Content)),
        chunks[2],
    );

    let submit = if form.is_submitting() {
        Span::styled("Creating...", Style::default().add_modifier(Modifier::DIM))
    } else if form.can_submit() {
        Span::styled(
            "[ Create Event ]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled("[ Create Event ]", Style::default().add_modifier(Modifier::DIM))
    };
    f.render_widget(Paragraph::new(Line::from(submit)), chunks[3]);
}

fn draw_toast(f: &mut Frame, toast: &Toast, area: Rect) {
    let color = match toast.severity() {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Info => Color::Blue,
    };
    let line = Line::from(Span::styled(
        format!(" {} ", toast.message()),
        Style::default().fg(Color::White).bg(color),
    ));
    f.render_widget(Paragraph::new(line), area);
}

fn draw_hints(f: &mut Frame, screen: Screen, area: Rect) {
    let keys: &[(&str, &str)] = match screen {
        Screen::Notifications => &[
            ("j/k", "move"),
            ("enter", "mark read"),
            ("f", "filter"),
            ("r", "refresh"),
            ("tab", "create"),
            ("q", "quit"),
        ],
        Screen::CreateEvent => &[
            ("tab", "next field"),
            ("←/→", "type"),
            ("enter", "create"),
            ("esc", "back"),
            ("ctrl-c", "quit"),
        ],
    };

    let mut spans = Vec::new();
    for (key, action) in keys {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            *action,
            Style::default().add_modifier(Modifier::DIM),
        ));
        spans.push(Span::raw("  "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
