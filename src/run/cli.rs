use anyhow::{Context, Result};
use std::path::Path;

use crate::categories::{CategoryCatalog, CategoryResolver};
use crate::db::{Database, ExpenseStore};
use crate::models::{ExpenseRecord, Mode};
use crate::ui::util::{format_amount, format_percentage, local_now};
use crate::views::{DetailsView, Route, StatisticsView};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    let catalog = CategoryCatalog::default();
    let command = args.get(1).map(String::as_str).unwrap_or("--help");
    let rest = args.get(2..).unwrap_or_default();

    match command {
        "add" | "a" => cli_add(rest, db, &catalog),
        "stats" | "s" => cli_stats(rest, db, &catalog),
        "details" | "d" => cli_details(rest, db, &catalog),
        "history" => cli_history(db, &catalog),
        "categories" => cli_categories(&catalog),
        "export" => cli_export(rest, db),
        "import" => cli_import(rest, db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("spendtui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SpendTUI: local expense tracker");
    println!();
    println!("Usage: spendtui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                              Launch interactive TUI");
    println!("  add <amount> <category> [date [time]]");
    println!("                                      Record an expense (date YYYY-MM-DD, time HH:MM)");
    println!("  stats [today|week|month]            Per-category breakdown (default: today)");
    println!("    --exclude <category>              Leave a category out of the total (repeatable)");
    println!("  details <category>                  Day, month and year sums for one category");
    println!("  history                             List every recorded expense");
    println!("  categories                          List known category ids");
    println!("  export [path]                       Export expenses to CSV");
    println!("  import <file.csv>                   Import date,category,amount rows");
    println!("  --help, -h                          Show this help");
    println!("  --version, -V                       Show version");
}

fn cli_add(args: &[String], db: &mut Database, catalog: &CategoryCatalog) -> Result<()> {
    if args.is_empty() {
        anyhow::bail!("Usage: spendtui add <amount> <category> [YYYY-MM-DD [HH:MM]]");
    }

    let record = ExpenseRecord::parse_entry(&args.join(" "), local_now())?;
    if !catalog.contains(&record.category) {
        eprintln!(
            "Warning: unknown category '{}'. Known: {}",
            record.category,
            catalog.ids().join(", ")
        );
    }

    let resolver = CategoryResolver::new(catalog);
    println!(
        "Added {} to {} on {}",
        format_amount(record.amount),
        resolver.resolve(Some(record.category.as_str())),
        record.date.format("%Y-%m-%d %H:%M")
    );
    db.append(record)?;
    Ok(())
}

fn cli_stats(args: &[String], db: &mut Database, catalog: &CategoryCatalog) -> Result<()> {
    let mode = match args.first().filter(|a| !a.starts_with('-')) {
        Some(key) => Mode::parse(key)
            .ok_or_else(|| anyhow::anyhow!("Unknown window '{key}'. Use today, week or month"))?,
        None => Mode::default(),
    };

    let excluded: Vec<&str> = args
        .windows(2)
        .filter(|w| w[0] == "--exclude")
        .map(|w| w[1].as_str())
        .collect();

    let mut view = StatisticsView::new();
    view.change_mode(mode, db, local_now());
    for category in &excluded {
        view.exclude_category(category);
    }

    let resolver = CategoryResolver::new(catalog);
    println!("SpendTUI: {}", view.title);
    println!("{}", "─".repeat(64));
    if view.summaries.is_empty() {
        println!("  No expenses in this window");
    }
    for summary in &view.summaries {
        let marker = if view.is_excluded(&summary.category) { "x" } else { " " };
        println!(
            "{marker} {:<24} {:>12} {:>8}  {}",
            resolver.resolve(Some(summary.category.as_str())),
            format_amount(summary.amount),
            format_percentage(summary.percentage),
            summary.color,
        );
    }
    println!("{}", "─".repeat(64));
    println!("  {:<24} {:>12}", "Total", format_amount(view.total_amount));
    if !excluded.is_empty() {
        println!("  (excluding: {})", excluded.join(", "));
    }
    Ok(())
}

fn cli_details(args: &[String], db: &mut Database, catalog: &CategoryCatalog) -> Result<()> {
    let Some(category) = args.first() else {
        anyhow::bail!("Usage: spendtui details <category>");
    };

    let route = Route::Details {
        category_id: Some(category.clone()),
        back: Route::Home.target().to_string(),
    };
    let resolver = CategoryResolver::new(catalog);
    let details = DetailsView::open(&route.params(), db, &resolver, local_now());

    println!("SpendTUI: {}", details.selected_category_name);
    println!("{}", "─".repeat(40));
    println!("  Today:       {:>14}", format_amount(details.amount_for_day));
    println!("  This month:  {:>14}", format_amount(details.amount_for_month));
    println!("  This year:   {:>14}", format_amount(details.amount_for_year));
    Ok(())
}

fn cli_history(db: &mut Database, catalog: &CategoryCatalog) -> Result<()> {
    let mut records = db.load();
    if records.is_empty() {
        println!("No expenses");
        return Ok(());
    }
    records.sort_by(|a, b| b.date.cmp(&a.date));

    let resolver = CategoryResolver::new(catalog);
    println!("{:<18} {:<24} {:>12}", "Date", "Category", "Amount");
    println!("{}", "─".repeat(56));
    for record in &records {
        println!(
            "{:<18} {:<24} {:>12}",
            record.date.format("%Y-%m-%d %H:%M"),
            resolver.resolve(Some(record.category.as_str())),
            format_amount(record.amount),
        );
    }
    println!("{} expenses", records.len());
    Ok(())
}

fn cli_categories(catalog: &CategoryCatalog) -> Result<()> {
    println!("{:<16} Name", "ID");
    println!("{}", "─".repeat(40));
    for (id, name) in catalog.entries() {
        println!("{id:<16} {name}");
    }
    Ok(())
}

fn cli_export(args: &[String], db: &mut Database) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/spendtui-export.csv")
        });

    let records = db.load();
    if records.is_empty() {
        println!("No expenses to export");
        return Ok(());
    }

    let count = crate::interchange::export_to_path(Path::new(&output_path), &records)?;
    println!("Exported {count} expenses to {output_path}");
    Ok(())
}

fn cli_import(args: &[String], db: &mut Database) -> Result<()> {
    let Some(file_path) = args.first() else {
        anyhow::bail!("Usage: spendtui import <file.csv>");
    };

    let expanded = shellexpand(file_path);
    let path = Path::new(&expanded);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }

    let imported = crate::interchange::import_from_path(path)?;
    if imported.is_empty() {
        println!("No expenses found in {file_path}");
        return Ok(());
    }

    let count = imported.len();
    let mut records = db
        .load_strict()
        .context("Refusing to overwrite unreadable expenses")?;
    records.extend(imported);
    db.persist(&records)?;
    println!("Imported {count} expenses ({} total)", records.len());
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
