use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use std::rc::Rc;

use super::{render_message, render_transactions, titled_block};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let credits = app.analysis.credits();
    if credits.is_empty() {
        render_message(f, area, "Payments Summary", &["No payments in this file"]);
        return;
    }

    let chunks = layout(area);

    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(app.analysis.inflow_total),
            Style::default()
                .fg(theme::GREEN)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} payments", credits.len()),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(titled_block("Total Payments"));
    f.render_widget(card, chunks[0]);

    render_transactions(f, chunks[1], "Payments", &credits, app.cursor());
}

/// Total card on top, payment table below.
pub(crate) fn layout(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(area)
}
