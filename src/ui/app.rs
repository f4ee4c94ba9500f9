use crate::analysis::{Analysis, DataState};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Expenses,
    Payments,
    Budgets,
    Forecast,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Expenses, Self::Payments, Self::Budgets, Self::Forecast]
    }

    fn position(self) -> usize {
        Self::all().iter().position(|s| *s == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expenses => write!(f, "Expenses"),
            Self::Payments => write!(f, "Payments"),
            Self::Budgets => write!(f, "Budget Recommendations"),
            Self::Forecast => write!(f, "Spending Forecast"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) index: usize,
    pub(crate) scroll: usize,
}

/// Dashboard state. Owns one finished `Analysis`; every tab reads from it.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) show_help: bool,
    pub(crate) status_message: String,
    pub(crate) source: String,
    pub(crate) analysis: Analysis,
    pub(crate) visible_rows: usize,
    cursors: [Cursor; 4],
}

impl App {
    pub(crate) fn new(source: impl Into<String>, analysis: Analysis) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Expenses,
            show_help: false,
            status_message: String::new(),
            source: source.into(),
            analysis,
            visible_rows: 20,
            cursors: [Cursor::default(); 4],
        };
        let note = match app.analysis.state() {
            DataState::NoData => "No transactions in this file",
            DataState::InsufficientHistory => {
                "Some categories have too little history for a trend; showing last month instead"
            }
            DataState::Ready => "",
        };
        app.set_status(note);
        app
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn cursor(&self) -> Cursor {
        self.cursors[self.screen.position()]
    }

    /// Number of selectable rows on the current tab.
    pub(crate) fn row_count(&self) -> usize {
        match self.screen {
            Screen::Expenses => self.analysis.debits().len(),
            Screen::Payments => self.analysis.credits().len(),
            Screen::Budgets => self.analysis.budgets.len(),
            Screen::Forecast => self.analysis.forecasts.len(),
        }
    }

    pub(crate) fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub(crate) fn next_screen(&mut self) {
        let screens = Screen::all();
        let next = (self.screen.position() + 1) % screens.len();
        self.screen = screens[next];
    }

    pub(crate) fn prev_screen(&mut self) {
        let screens = Screen::all();
        let idx = self.screen.position();
        let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
        self.screen = screens[prev];
    }

    pub(crate) fn move_down(&mut self) {
        let (len, page) = (self.row_count(), self.visible_rows);
        let c = self.cursor_mut();
        scroll_down(&mut c.index, &mut c.scroll, len, page);
    }

    pub(crate) fn move_up(&mut self) {
        let c = self.cursor_mut();
        scroll_up(&mut c.index, &mut c.scroll);
    }

    pub(crate) fn goto_top(&mut self) {
        let c = self.cursor_mut();
        scroll_to_top(&mut c.index, &mut c.scroll);
    }

    pub(crate) fn goto_bottom(&mut self) {
        let (len, page) = (self.row_count(), self.visible_rows);
        let c = self.cursor_mut();
        scroll_to_bottom(&mut c.index, &mut c.scroll, len, page);
    }

    fn cursor_mut(&mut self) -> &mut Cursor {
        &mut self.cursors[self.screen.position()]
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
