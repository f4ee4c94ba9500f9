use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Bar, BarChart, BarGroup},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use std::rc::Rc;

use super::{render_message, render_transactions, titled_block};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let debits = app.analysis.debits();
    if debits.is_empty() {
        render_message(
            f,
            area,
            "Your Expenses",
            &["No expenses in this file", "Every line is a payment or the file is empty"],
        );
        return;
    }

    let chunks = layout(area);
    render_category_chart(f, chunks[0], app);
    render_transactions(f, chunks[1], "Your Expenses", &debits, app.cursor());
}

/// Category chart on top, expense table below.
pub(crate) fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Min(6)])
        .split(area)
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .analysis
        .expense_totals
        .iter()
        .take(12)
        .map(|(category, amt)| {
            Bar::default()
                .value(amt.round().to_u64().unwrap_or(0))
                .label(Line::from(truncate(category.as_str(), 10)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::TEXT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block("Expenses by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));
    f.render_widget(chart, area);
}
