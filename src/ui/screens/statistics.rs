use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::{panel, render_empty};
use crate::models::Mode;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{bar_width, format_amount, format_percentage, truncate};

const NAME_WIDTH: usize = 20;
// amount + percentage columns plus separators
const FIGURES_WIDTH: usize = 24;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode + total
            Constraint::Min(3),    // Bars
        ])
        .split(area);

    render_header(f, chunks[0], app);

    if app.statistics.summaries.is_empty() {
        render_empty(
            f,
            chunks[1],
            "By category",
            &[
                "No expenses in this window",
                "Press w or m to widen it, or :add <amount> <category>",
            ],
        );
        return;
    }

    render_bars(f, chunks[1], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.statistics;
    let mut spans = Vec::new();
    for mode in Mode::all() {
        let style = if *mode == view.mode {
            theme::selected_style()
        } else {
            theme::dim_style()
        };
        spans.push(Span::styled(format!(" {} ", mode.title()), style));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("  Total: ", theme::dim_style()));
    spans.push(Span::styled(format_amount(view.total_amount), theme::total_style()));
    if !view.excluded.is_empty() {
        spans.push(Span::styled(
            format!("  ({} excluded)", view.excluded.len()),
            theme::dim_style(),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(panel(view.title)), area);
}

fn render_bars(f: &mut Frame, area: Rect, app: &App) {
    let view = &app.statistics;
    let track = (area.width as usize)
        .saturating_sub(NAME_WIDTH + FIGURES_WIDTH + 4)
        .max(1);
    let visible = area.height.saturating_sub(2) as usize;
    let offset = app
        .statistics_index
        .saturating_sub(visible.saturating_sub(1));

    let items: Vec<ListItem> = view
        .summaries
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(i, summary)| {
            let excluded = view.is_excluded(&summary.category);
            let name = truncate(
                app.resolver.resolve(Some(summary.category.as_str())),
                NAME_WIDTH - 1,
            );

            let name_style = if i == app.statistics_index {
                theme::selected_style()
            } else if excluded {
                theme::excluded_style()
            } else {
                theme::normal_style()
            };
            let bar_style = if excluded {
                theme::dim_style()
            } else {
                Style::default().fg(theme::bar_color(summary.color))
            };

            let filled = bar_width(summary.percentage, track);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{name:<NAME_WIDTH$}"), name_style),
                Span::raw(" "),
                Span::styled("█".repeat(filled), bar_style),
                Span::styled("░".repeat(track - filled), theme::dim_style()),
                Span::raw(" "),
                Span::styled(
                    format!("{:>12}", format_amount(summary.amount)),
                    if excluded {
                        theme::excluded_style()
                    } else {
                        theme::expense_style()
                    },
                ),
                Span::styled(
                    format!("{:>8}", format_percentage(summary.percentage)),
                    theme::dim_style(),
                ),
            ]))
        })
        .collect();

    let title = format!("By category ({})", view.summaries.len());
    f.render_widget(List::new(items).block(panel(&title)), area);
}
