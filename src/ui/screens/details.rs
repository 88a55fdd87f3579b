use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{panel, render_card, render_empty};
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let Some(details) = &app.details else {
        render_empty(f, area, "Details", &["No category selected"]);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Category name
            Constraint::Length(5), // Day / month / year
            Constraint::Min(0),
        ])
        .split(area);

    let heading = Paragraph::new(Line::from(vec![
        Span::styled(details.selected_category_name.as_str(), theme::section_style()),
        Span::styled(
            format!("   Esc or swipe to go back to {}", details.back_target),
            theme::dim_style(),
        ),
    ]))
    .block(panel("Details"));
    f.render_widget(heading, chunks[0]);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);

    render_card(f, cards[0], "Today", details.amount_for_day, theme::RED, None);
    render_card(
        f,
        cards[1],
        "This month",
        details.amount_for_month,
        theme::YELLOW,
        None,
    );
    render_card(
        f,
        cards[2],
        "This year",
        details.amount_for_year,
        theme::GREEN,
        None,
    );
}
