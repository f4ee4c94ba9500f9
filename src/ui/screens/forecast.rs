use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Row, Sparkline, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use std::rc::Rc;

use super::{render_message, table_rows, titled_block};
use crate::models::{Forecast, ForecastTarget};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.analysis.forecasts.is_empty() {
        render_message(
            f,
            area,
            "Predicted Spending for Next Month",
            &["Not enough data to forecast"],
        );
        return;
    }

    let chunks = layout(area);
    render_table(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
    render_total_history(f, chunks[2], app);
}

pub(crate) fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(10),
            Constraint::Length(4),
        ])
        .split(area)
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(
        ["Category", "Month", "Predicted", "Method", "Fitted On"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );

    let cursor = app.cursor();
    let rows: Vec<Row> = app
        .analysis
        .forecasts
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(table_rows(area))
        .map(|(i, forecast)| {
            let label_style = if forecast.target == ForecastTarget::Total {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let fitted = match forecast.fitted_range() {
                Some((start, end)) if start == end => start.to_string(),
                Some((start, end)) => format!("{start} to {end}"),
                None => "-".into(),
            };
            Row::new(vec![
                Cell::from(Span::styled(
                    truncate(&forecast.target.to_string(), 20),
                    label_style,
                )),
                Cell::from(forecast.month.to_string()),
                Cell::from(format_amount(forecast.value)),
                Cell::from(Span::styled(
                    forecast.provenance.as_str(),
                    Style::default().fg(theme::provenance_color(forecast.provenance)),
                )),
                Cell::from(fitted),
            ])
            .style(theme::row_style(i, cursor.index))
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(18),
        Constraint::Length(8),
        Constraint::Length(20),
    ];
    f.render_widget(
        Table::new(rows, widths)
            .header(header)
            .block(titled_block("Predicted Spending for Next Month")),
        area,
    );
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .analysis
        .category_forecasts()
        .take(12)
        .map(|forecast| {
            Bar::default()
                .value(forecast.value.round().to_u64().unwrap_or(0))
                .label(Line::from(truncate(&forecast.target.to_string(), 10)))
                .style(Style::default().fg(theme::provenance_color(forecast.provenance)))
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block("Predicted Spending by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .value_style(Style::default().fg(theme::TEXT));
    f.render_widget(chart, area);
}

fn render_total_history(f: &mut Frame, area: Rect, app: &App) {
    let total = app.analysis.total_forecast();
    let data: Vec<u64> = total.map(history_points).unwrap_or_default();
    let title = match total {
        Some(next) => format!("Monthly Spending, next {}", format_amount(next.value)),
        None => "Monthly Spending".into(),
    };

    let sparkline = Sparkline::default()
        .block(titled_block(title))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));
    f.render_widget(sparkline, area);
}

fn history_points(forecast: &Forecast) -> Vec<u64> {
    forecast
        .history
        .iter()
        .map(|(_, v)| *v)
        .chain(std::iter::once(forecast.value))
        .map(|v| v.round().to_u64().unwrap_or(0))
        .collect()
}
