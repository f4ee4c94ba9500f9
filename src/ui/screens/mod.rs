use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::Transaction;
use crate::ui::app::Cursor;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) mod budgets;
pub(crate) mod expenses;
pub(crate) mod forecast;
pub(crate) mod payments;

/// Data rows a bordered table with a one-line header can draw in `area`.
pub(crate) fn table_rows(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

pub(crate) fn titled_block(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {} ", title.into()), theme::title_style()))
}

pub(crate) fn render_message(f: &mut Frame, area: Rect, title: &str, lines: &[&str]) {
    let mut text = vec![Line::from("")];
    for line in lines {
        text.push(Line::from(Span::styled(line.to_string(), theme::dim_style())));
        text.push(Line::from(""));
    }
    f.render_widget(
        Paragraph::new(text).centered().block(titled_block(title)),
        area,
    );
}

/// Date / description / category / amount table shared by the expense and
/// payment tabs.
pub(crate) fn render_transactions(
    f: &mut Frame,
    area: Rect,
    title: &str,
    txns: &[&Transaction],
    cursor: Cursor,
) {
    let header = Row::new(
        ["Date", "Details", "Category", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    )
    .height(1);

    let rows: Vec<Row> = txns
        .iter()
        .enumerate()
        .skip(cursor.scroll)
        .take(table_rows(area))
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            Row::new(vec![
                Cell::from(format!("  {}", txn.date.format("%d/%m/%Y"))),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(txn.category.to_string()),
                Cell::from(Span::styled(format_amount(txn.abs_amount()), amount_style)),
            ])
            .style(theme::row_style(i, cursor.index))
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(18),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!("{title} ({})", txns.len())));
    f.render_widget(table, area);
}
