use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::util::{local_now, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};
use crate::views::{swipe_intent, Point, Route, SwipeIntent};

pub(crate) fn as_tui(db: &mut Database) -> Result<()> {
    let mut app = App::new();
    app.activate(Route::Home, db, local_now());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("TUI started");
    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "TUI exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab + status + command bars, table border and header
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if app.show_help {
                    app.show_help = false;
                    continue;
                }
                match app.input_mode {
                    InputMode::Normal => handle_normal_input(key, app, db)?,
                    InputMode::Command => handle_command_input(key, app, db)?,
                }
            }
            Event::Mouse(mouse) => handle_mouse(mouse, app),
            _ => {}
        }

        app.process_navigation(db, local_now());
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('1') => Route::Home.dispatch(app),
        KeyCode::Char('2') => Route::History.dispatch(app),
        KeyCode::Char('3') => Route::Statistics.dispatch(app),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            screens[next].route().dispatch(app);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            screens[prev].route().dispatch(app);
        }
        KeyCode::Char('h') | KeyCode::Left => app.handle_swipe(SwipeIntent::Left),
        KeyCode::Char('l') | KeyCode::Right => app.handle_swipe(SwipeIntent::Right),
        KeyCode::Char('r') => commands::handle_command("refresh", app, db)?,
        KeyCode::Char('t') if app.screen == Screen::Statistics => {
            commands::handle_command("mode today", app, db)?;
        }
        KeyCode::Char('w') if app.screen == Screen::Statistics => {
            commands::handle_command("mode week", app, db)?;
        }
        KeyCode::Char('m') if app.screen == Screen::Statistics => {
            commands::handle_command("mode month", app, db)?;
        }
        KeyCode::Char('x') if app.screen == Screen::Statistics => {
            commands::handle_command("exclude", app, db)?;
        }
        KeyCode::Enter if app.screen == Screen::Statistics => {
            commands::handle_command("details", app, db)?;
        }
        KeyCode::Esc => handle_escape(app),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

/// A left-button press starts a drag; the release classifies it as a swipe.
fn handle_mouse(mouse: MouseEvent, app: &mut App) {
    let position = Point::from_cell(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            app.drag_start = Some(position);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(start) = app.drag_start.take() {
                let intent = swipe_intent(start, position);
                tracing::debug!(?start, end = ?position, ?intent, "Drag released");
                app.handle_swipe(intent);
            }
        }
        MouseEventKind::ScrollDown => handle_move_down(app),
        MouseEventKind::ScrollUp => handle_move_up(app),
        _ => {}
    }
}

fn handle_escape(app: &mut App) {
    if app.screen == Screen::Details {
        if let Some(route) = app.details.as_ref().map(|d| d.back_route()) {
            route.dispatch(app);
        }
    } else if !app.status_message.is_empty() {
        app.status_message.clear();
    }
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::History => {
            let page = app.visible_rows;
            scroll_down(
                &mut app.history_index,
                &mut app.history_scroll,
                app.records.len(),
                page,
            );
        }
        Screen::Statistics => {
            if app.statistics_index + 1 < app.statistics.summaries.len() {
                app.statistics_index += 1;
            }
        }
        Screen::Home | Screen::Details => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::History => scroll_up(&mut app.history_index, &mut app.history_scroll),
        Screen::Statistics => {
            app.statistics_index = app.statistics_index.saturating_sub(1);
        }
        Screen::Home | Screen::Details => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::History => scroll_to_top(&mut app.history_index, &mut app.history_scroll),
        Screen::Statistics => app.statistics_index = 0,
        Screen::Home | Screen::Details => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::History => {
            let page = app.visible_rows;
            scroll_to_bottom(
                &mut app.history_index,
                &mut app.history_scroll,
                app.records.len(),
                page,
            );
        }
        Screen::Statistics => {
            app.statistics_index = app.statistics.summaries.len().saturating_sub(1);
        }
        Screen::Home | Screen::Details => {}
    }
}
