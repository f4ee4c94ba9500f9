use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::rc::Rc;

use super::{render_message, table_rows, titled_block};
use crate::models::{BudgetRecommendation, SpendingStatus};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let recs: Vec<&BudgetRecommendation> = app.analysis.budgets.values().collect();
    if recs.is_empty() {
        render_message(
            f,
            area,
            "Budget Recommendations",
            &["Not enough data to generate recommendations"],
        );
        return;
    }

    let chunks = layout(area);
    render_table(f, chunks[0], app, &recs);
    render_comparison_chart(f, chunks[1], &recs);
    render_legend(f, chunks[2], recs.get(app.cursor().index).copied());
}

/// Recommendation table, comparison chart, then the deviation legend.
pub(crate) fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(12),
            Constraint::Length(4),
        ])
        .split(area)
}

fn render_table(f: &mut Frame, area: Rect, app: &App, recs: &[&BudgetRecommendation]) {
    let header = Row::new(
        [
            "Category",
            "Last Month",
            "Average",
            "Suggested",
            "Deviation",
            "Status",
        ]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let cursor = app.cursor();
    let rows: Vec<Row> = recs
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(table_rows(area))
        .map(|(i, rec)| {
            let color = theme::status_color(rec.status);
            Row::new(vec![
                Cell::from(truncate(rec.category.as_str(), 18)),
                Cell::from(format_amount(rec.latest_outflow)),
                Cell::from(format_amount(rec.trailing_average)),
                Cell::from(format_amount(rec.ceiling)),
                Cell::from(Span::styled(
                    format_percent(rec.deviation_pct),
                    Style::default().fg(color),
                )),
                Cell::from(Span::styled(
                    rec.status.as_str(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ])
            .style(theme::row_style(i, cursor.index))
        })
        .collect();

    let widths = [
        Constraint::Min(18),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(14),
    ];
    let months = app.analysis.budget_window;
    let title = match app.analysis.aggregates.latest_month() {
        Some(month) => format!("Budget Recommendations as of {month} (window {months} mo)"),
        None => "Budget Recommendations".into(),
    };
    f.render_widget(
        Table::new(rows, widths).header(header).block(titled_block(title)),
        area,
    );
}

fn render_comparison_chart(f: &mut Frame, area: Rect, recs: &[&BudgetRecommendation]) {
    let groups: Vec<BarGroup> = recs
        .iter()
        .take(8)
        .map(|rec| {
            BarGroup::default()
                .label(Line::from(truncate(rec.category.as_str(), 12)))
                .bars(&[
                    amount_bar(rec.latest_outflow, theme::status_color(rec.status)),
                    amount_bar(rec.ceiling, theme::ACCENT),
                ])
        })
        .collect();

    let mut chart = BarChart::default()
        .block(titled_block("Last Month vs Suggested Budget"))
        .bar_width(6)
        .bar_gap(1)
        .group_gap(3)
        .value_style(Style::default().fg(theme::TEXT));
    for group in groups {
        chart = chart.data(group);
    }
    f.render_widget(chart, area);
}

fn amount_bar(amount: Decimal, color: ratatui::style::Color) -> Bar<'static> {
    Bar::default()
        .value(amount.round().to_u64().unwrap_or(0))
        .style(Style::default().fg(color))
}

fn render_legend(f: &mut Frame, area: Rect, selected: Option<&BudgetRecommendation>) {
    let threshold = SpendingStatus::THRESHOLD_PCT;
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("Overspending > +{threshold}%"),
            Style::default().fg(theme::RED),
        ),
        Span::styled("   ", theme::dim_style()),
        Span::styled(
            format!("Spending Less < -{threshold}%"),
            Style::default().fg(theme::GREEN),
        ),
        Span::styled("   ", theme::dim_style()),
        Span::styled("Within Range otherwise", Style::default().fg(theme::YELLOW)),
    ])];
    if let Some(rec) = selected {
        lines.push(Line::from(Span::styled(
            rec.status.advice(&rec.category),
            theme::normal_style(),
        )));
    }
    f.render_widget(
        Paragraph::new(lines).block(titled_block("Deviation Range")),
        area,
    );
}
