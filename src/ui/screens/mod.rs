pub(crate) mod details;
pub(crate) mod history;
pub(crate) mod home;
pub(crate) mod statistics;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::theme;
use crate::ui::util::format_amount;

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: Color,
    subtitle: Option<String>,
) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, lines: &[&str]) {
    let mut text = vec![Line::from("")];
    for line in lines {
        text.push(Line::from(Span::styled(line.to_string(), theme::dim_style())));
        text.push(Line::from(""));
    }
    f.render_widget(Paragraph::new(text).centered().block(panel(title)), area);
}
