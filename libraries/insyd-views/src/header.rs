//! Top-of-screen navigation.

pub const TITLE: &str = "Insyd Notifications";

/// One of the two top-level screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    Notifications,
    CreateEvent,
}

impl Screen {
    pub const ALL: [Screen; 2] = [Screen::Notifications, Screen::CreateEvent];

    pub fn label(&self) -> &'static str {
        match self {
            Screen::Notifications => "Notifications",
            Screen::CreateEvent => "Create Event",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Screen::Notifications => 0,
            Screen::CreateEvent => 1,
        }
    }
}

/// Title plus a tab per screen, with one tab active.
#[derive(Debug, Clone, Default)]
pub struct Header {
    active: Screen,
}

impl Header {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &'static str {
        TITLE
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn is_active(&self, screen: Screen) -> bool {
        self.active == screen
    }

    /// Switch to `screen`. Returns whether anything changed.
    pub fn select(&mut self, screen: Screen) -> bool {
        let changed = self.active != screen;
        self.active = screen;
        changed
    }

    /// Move to the other tab.
    pub fn next(&mut self) -> Screen {
        let idx = (self.active.index() + 1) % Screen::ALL.len();
        self.active = Screen::ALL[idx];
        self.active
    }

    /// `(label, active)` per tab, in display order.
    pub fn tabs(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        Screen::ALL
            .into_iter()
            .map(move |screen| (screen.label(), self.is_active(screen)))
    }
}
