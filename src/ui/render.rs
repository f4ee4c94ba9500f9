use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use std::rc::Rc;

use super::app::{App, Screen};
use super::screens;
use super::theme;

fn frame_layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area)
}

/// Rows the current tab's table shows in a frame of this size. Paging uses
/// it so the cursor never leaves the drawn rows.
pub(crate) fn table_page_size(area: Rect, app: &App) -> usize {
    let content = frame_layout(area)[1];
    let table = match app.screen {
        Screen::Expenses => screens::expenses::layout(content)[1],
        Screen::Payments => screens::payments::layout(content)[1],
        Screen::Budgets => screens::budgets::layout(content)[0],
        Screen::Forecast => screens::forecast::layout(content)[0],
    };
    screens::table_rows(table).max(1)
}

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = frame_layout(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), theme::dim_style()),
                    Span::styled(
                        s.to_string(),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(format!("{num}:{s}"), theme::dim_style()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Expenses => screens::expenses::render(f, area, app),
        Screen::Payments => screens::payments::render(f, area, app),
        Screen::Budgets => screens::budgets::render(f, area, app),
        Screen::Forecast => screens::forecast::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let (badge, badge_style) = theme::state_badge(app.analysis.state());
    let info = format!(
        " {} | {} txns | {}",
        app.source,
        app.analysis.transactions.len(),
        app.status_message
    );
    let right = " Tab/1-4 switch | j/k scroll | ? help | q quit ";

    let used = badge.chars().count() + info.chars().count() + right.len();
    let pad = (area.width as usize).saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(badge, badge_style),
        Span::styled(info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let help_text = vec![
        Line::from(Span::styled(
            " Spendcast Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading(" Navigation"),
        entry("  Tab/Shift-Tab    Cycle tabs            1-4        Jump to tab"),
        entry("  j/k or Up/Down   Move cursor           g/G        Top/Bottom"),
        entry("  Ctrl-d/u         Half page down/up     q, Ctrl-c  Quit"),
        Line::from(""),
        heading(" Tabs"),
        entry("  Expenses         Debits and totals by category"),
        entry("  Payments         Credits and the payments total"),
        entry("  Budget           Trailing average, suggested ceiling, deviation"),
        entry("  Forecast         Next month per category and overall"),
        Line::from(""),
        heading(" Keywords"),
        entry("  spendcast add-keyword <category> <keyword>   teach a mapping"),
        entry("  spendcast learn <category> <description>     suggest and save one"),
        Line::from(""),
        Line::from(Span::styled(" Press any key to close ", theme::dim_style())),
    ];

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
