use std::collections::BTreeMap;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

/// Key bindings shown in the help overlay, grouped by section.
pub(crate) const KEY_HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("1-3 / Tab", "Switch screens"),
            ("j/k", "Move cursor"),
            ("g/G", "Top/Bottom"),
            ("h/l or drag", "Swipe left/right"),
            ("Esc", "Back from Details"),
            ("Ctrl-q", "Quit"),
        ],
    ),
    (
        "Statistics",
        &[
            ("t/w/m", "Today/Week/Month"),
            ("x", "Exclude from total"),
            ("Enter", "Category details"),
            ("r", "Refresh"),
        ],
    ),
];

const HELP_WIDTH: u16 = 64;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, screen, status, command] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_tab_bar(f, tabs, app);
    match app.screen {
        Screen::Home => super::screens::home::render(f, screen, app),
        Screen::History => super::screens::history::render(f, screen, app),
        Screen::Statistics => super::screens::statistics::render(f, screen, app),
        Screen::Details => super::screens::details::render(f, screen, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

/// The tab lit up for `screen`. Details belongs to Statistics.
pub(crate) fn active_tab(screen: Screen) -> Screen {
    match screen {
        Screen::Details => Screen::Statistics,
        other => other,
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let active = active_tab(app.screen);
    let titles = Screen::all().iter().enumerate().map(|(i, s)| {
        let label_style = if *s == active {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        Line::from(vec![
            Span::styled(format!("{}:", i + 1), theme::dim_style()),
            Span::styled(s.to_string(), label_style),
        ])
    });

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(tabs, area);
}

/// Short key reminder for the right side of the status bar.
pub(crate) fn screen_hints(screen: Screen) -> &'static str {
    match screen {
        Screen::Home => ":add expense | Tab screens | ? help",
        Screen::History => "j/k move | g/G top/bottom | ? help",
        Screen::Statistics => "t/w/m window | x exclude | Enter details",
        Screen::Details => "Esc back | h/l swipe | ? help",
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
    };
    let left = Line::from(vec![
        Span::styled(
            format!(" {} ", app.input_mode),
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(mode_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" {} | {} records", app.screen, app.records.len())),
    ]);
    let right = Line::from(format!("{} ", screen_hints(app.screen)));

    f.render_widget(Block::default().style(theme::status_bar_style()), area);
    f.render_widget(Paragraph::new(left), area);
    f.render_widget(Paragraph::new(right).alignment(Alignment::Right), area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Command => {
            let offset = 1 + app.command_input.chars().count() as u16;
            f.set_cursor_position((area.x + offset, area.y));
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(app.command_input.as_str(), theme::command_bar_style()),
            ])
        }
        InputMode::Normal if app.status_message.is_empty() => Line::styled(
            " Press : for commands, ? for help",
            theme::dim_style(),
        ),
        InputMode::Normal => {
            Line::styled(app.status_message.as_str(), theme::command_bar_style())
        }
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );
}

/// One entry per command, named by its longest alias, sorted by name.
/// Single-letter shortcuts are left out.
pub(crate) fn command_help() -> Vec<(&'static str, &'static str)> {
    let mut by_description: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    for (&name, cmd) in commands::COMMANDS.iter().filter(|(name, _)| name.len() > 1) {
        let entry = by_description.entry(cmd.description).or_insert(name);
        if name.len() > entry.len() || (name.len() == entry.len() && name < *entry) {
            *entry = name;
        }
    }
    let mut lines: Vec<_> = by_description
        .into_iter()
        .map(|(desc, name)| (name, desc))
        .collect();
    lines.sort_unstable();
    lines
}

/// Text of the help overlay as `(line, is_heading)` pairs.
pub(crate) fn help_lines() -> Vec<(String, bool)> {
    let mut lines = Vec::new();
    let mut section = |title: &str, rows: Vec<String>| {
        lines.push((format!(" {title}"), true));
        lines.extend(rows.into_iter().map(|row| (row, false)));
        lines.push((String::new(), false));
    };

    for &(title, keys) in KEY_HELP {
        section(
            title,
            keys.iter()
                .map(|(key, action)| format!("  {key:<14} {action}"))
                .collect(),
        );
    }
    section(
        "Commands",
        command_help()
            .into_iter()
            .map(|(name, desc)| format!("  :{name:<13} {desc}"))
            .collect(),
    );
    lines
}

/// `width` x `height` rectangle centered in `area`, shrunk to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut text: Vec<Line> = help_lines()
        .into_iter()
        .map(|(line, heading)| {
            let style = if heading {
                theme::section_style()
            } else {
                theme::normal_style()
            };
            Line::styled(line, style)
        })
        .collect();
    text.push(Line::styled(" Press any key to close", theme::dim_style()));

    let popup = centered(area, HELP_WIDTH, text.len() as u16 + 2);
    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" SpendTUI Help ", theme::title_style()))
                .border_style(Style::default().fg(theme::ACCENT))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}
