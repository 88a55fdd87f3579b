use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use super::util::{format_amount, local_now};
use crate::db::{Database, ExpenseStore};
use crate::models::{ExpenseRecord, Mode};
use crate::views::Route;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit SpendTUI", cmd_quit, r);
    register_command!("quit", "Quit SpendTUI", cmd_quit, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("home", "Go to Home", cmd_home, r);
    register_command!("history", "Go to History", cmd_history, r);
    register_command!("s", "Go to Statistics", cmd_statistics, r);
    register_command!("stats", "Go to Statistics", cmd_statistics, r);
    register_command!("statistics", "Go to Statistics", cmd_statistics, r);
    register_command!(
        "mode",
        "Statistics window (e.g. :mode week)",
        cmd_mode,
        r
    );
    register_command!("m", "Statistics window (e.g. :m month)", cmd_mode, r);
    register_command!("refresh", "Reload from storage", cmd_refresh, r);
    register_command!(
        "exclude",
        "Hide a category from the total (e.g. :exclude food)",
        cmd_exclude,
        r
    );
    register_command!(
        "details",
        "Show day/month/year sums (e.g. :details food)",
        cmd_details,
        r
    );
    register_command!(
        "add",
        "Add expense (e.g. :add 4.50 food 2024-03-08 12:30)",
        cmd_add,
        r
    );
    register_command!(
        "a",
        "Add expense (e.g. :a 4.50 food)",
        cmd_add,
        r
    );
    register_command!("categories", "List category ids", cmd_categories, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    app.process_navigation(db, local_now());
    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_home(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    Route::Home.dispatch(app);
    Ok(())
}

fn cmd_history(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    Route::History.dispatch(app);
    Ok(())
}

fn cmd_statistics(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    Route::Statistics.dispatch(app);
    Ok(())
}

fn cmd_mode(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let Some(mode) = Mode::parse(args) else {
        let keys: Vec<&str> = Mode::all().iter().map(|m| m.key()).collect();
        app.set_status(format!("Usage: :mode <{}>", keys.join("|")));
        return Ok(());
    };

    let now = local_now();
    if app.screen != Screen::Statistics {
        app.activate(Route::Statistics, db, now);
    }
    app.statistics.change_mode(mode, db, now);
    app.statistics_index = 0;
    app.set_status(format!("Showing: {}", mode.title()));
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.refresh_current(db, local_now());
    app.set_status("Refreshed");
    Ok(())
}

fn cmd_exclude(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Statistics {
        app.set_status("Navigate to Statistics first");
        return Ok(());
    }

    let category = if args.is_empty() {
        match app.selected_category() {
            Some(id) => id.to_string(),
            None => {
                app.set_status("Usage: :exclude <category-id>");
                return Ok(());
            }
        }
    } else {
        args.to_string()
    };

    app.statistics.exclude_category(&category);
    app.set_status(format!(
        "Excluded {}. Total: {}",
        app.resolver.resolve(Some(category.as_str())),
        format_amount(app.statistics.total_amount)
    ));
    Ok(())
}

fn cmd_details(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let category = if args.is_empty() {
        app.selected_category().map(str::to_string)
    } else {
        Some(args.to_string())
    };

    match category {
        Some(id) if app.screen == Screen::Statistics => {
            app.statistics.select_category(&id).dispatch(app);
        }
        Some(id) => Route::Details {
            category_id: Some(id),
            back: app.screen.route().target().to_string(),
        }
        .dispatch(app),
        None => app.set_status("Usage: :details <category-id>"),
    }
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add <amount> <category> [YYYY-MM-DD [HH:MM]]");
        return Ok(());
    }

    let now = local_now();
    let record = match ExpenseRecord::parse_entry(args, now) {
        Ok(record) => record,
        Err(e) => {
            app.set_status(format!("{e}"));
            return Ok(());
        }
    };

    let known = app.catalog.contains(&record.category);
    let message = format!(
        "Added {} to {}",
        format_amount(record.amount),
        app.resolver.resolve(Some(record.category.as_str()))
    );
    db.append(record)?;
    app.refresh_current(db, now);

    if known {
        app.set_status(message);
    } else {
        app.set_status(format!(
            "{message}. Known categories: {}",
            app.catalog.ids().join(", ")
        ));
    }
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let listing: Vec<String> = app
        .catalog
        .entries()
        .map(|(id, name)| format!("{id}={name}"))
        .collect();
    app.set_status(listing.join("  "));
    Ok(())
}
