use ratatui::{
    layout::{Constraint, Rect},
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use super::{panel, render_empty};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.records.is_empty() {
        render_empty(
            f,
            area,
            "History (0)",
            &["No expenses recorded yet", "Add one with :add <amount> <category>"],
        );
        return;
    }

    let header_cells = ["Date", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .records
        .iter()
        .enumerate()
        .skip(app.history_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, record)| {
            let style = if i == app.history_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", record.date.format("%Y-%m-%d %H:%M"))),
                Cell::from(truncate(
                    app.resolver.resolve(Some(record.category.as_str())),
                    24,
                )),
                Cell::from(Span::styled(
                    format_amount(record.amount),
                    theme::expense_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(20),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let title = format!("History ({})", app.records.len());
    let table = Table::new(rows, widths).header(header).block(panel(&title));
    f.render_widget(table, area);
}
