use ratatui::style::{Color, Modifier, Style};

use crate::analysis::DataState;
use crate::models::{Provenance, SpendingStatus};

pub(crate) const HEADER_BG: Color = Color::Rgb(30, 30, 46);
pub(crate) const HEADER_FG: Color = Color::Rgb(205, 214, 244);
pub(crate) const ACCENT: Color = Color::Rgb(137, 180, 250);
pub(crate) const GREEN: Color = Color::Rgb(166, 227, 161);
pub(crate) const RED: Color = Color::Rgb(243, 139, 168);
pub(crate) const YELLOW: Color = Color::Rgb(249, 226, 175);
pub(crate) const SURFACE: Color = Color::Rgb(49, 50, 68);
pub(crate) const TEXT: Color = Color::Rgb(205, 214, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(127, 132, 156);
pub(crate) const OVERLAY: Color = Color::Rgb(69, 71, 90);

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}

pub(crate) fn row_style(i: usize, cursor: usize) -> Style {
    if i == cursor {
        selected_style()
    } else if i % 2 == 1 {
        alt_row_style()
    } else {
        normal_style()
    }
}

pub(crate) fn status_color(status: SpendingStatus) -> Color {
    match status {
        SpendingStatus::Overspending => RED,
        SpendingStatus::SpendingLess => GREEN,
        SpendingStatus::WithinRange => YELLOW,
    }
}

pub(crate) fn provenance_color(provenance: Provenance) -> Color {
    match provenance {
        Provenance::Trend => ACCENT,
        Provenance::Naive => YELLOW,
    }
}

pub(crate) fn state_badge(state: DataState) -> (&'static str, Style) {
    let (label, bg) = match state {
        DataState::Ready => (" READY ", GREEN),
        DataState::InsufficientHistory => (" SHORT HISTORY ", YELLOW),
        DataState::NoData => (" NO DATA ", RED),
    };
    (
        label,
        Style::default()
            .fg(HEADER_BG)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )
}
