use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

use super::{panel, render_card, render_empty};
use crate::aggregate::compute_category_totals;
use crate::models::Mode;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, local_now, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(4),    // Today's expenses
        ])
        .split(area);

    render_cards(f, chunks[0], app);
    render_today(f, chunks[1], app);
}

fn render_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let now = local_now();
    for (card, mode) in cards.iter().zip(Mode::all()) {
        let totals = compute_category_totals(&app.records, *mode, now);
        let categories = totals.summaries.len();
        render_card(
            f,
            *card,
            mode.title(),
            totals.total_amount,
            theme::RED,
            Some(format!(
                "{categories} categor{}",
                if categories == 1 { "y" } else { "ies" }
            )),
        );
    }
}

fn render_today(f: &mut Frame, area: Rect, app: &App) {
    let now = local_now();
    let today: Vec<_> = app
        .records
        .iter()
        .filter(|r| r.is_same_day(now))
        .collect();

    if today.is_empty() {
        render_empty(
            f,
            area,
            "Today",
            &[
                "Nothing spent today",
                "Add an expense with :add <amount> <category>",
            ],
        );
        return;
    }

    let items: Vec<ListItem> = today
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .enumerate()
        .map(|(i, record)| {
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let name = truncate(app.resolver.resolve(Some(record.category.as_str())), 24);
            ListItem::new(Line::from(vec![
                Span::styled(format!("  {}  ", record.date.format("%H:%M")), theme::dim_style()),
                Span::styled(format!("{name:<26}"), style),
                Span::styled(format!("{:>12}", format_amount(record.amount)), theme::expense_style()),
            ]))
        })
        .collect();

    f.render_widget(
        List::new(items).block(panel(&format!("Today ({})", today.len()))),
        area,
    );
}
