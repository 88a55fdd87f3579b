#![allow(clippy::unwrap_used)]

use super::*;
use std::io::Write;

fn make_csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn import_args(file: &tempfile::NamedTempFile) -> Vec<String> {
    vec![file.path().display().to_string()]
}

// ── import ────────────────────────────────────────────────────

#[test]
fn test_import_appends_to_stored_expenses() {
    let mut db = Database::open_in_memory().unwrap();
    let file = make_csv_file("date,category,amount\n2024-03-08,food,12.50\n");
    cli_import(&import_args(&file), &mut db).unwrap();

    let again = make_csv_file("2024-03-09,gifts,3\n");
    cli_import(&import_args(&again), &mut db).unwrap();

    let stored = db.load();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[1].category, "gifts");
}

#[test]
fn test_import_keeps_malformed_blob() {
    let mut db = Database::open_in_memory().unwrap();
    db.set_value("expenses", "{not json").unwrap();
    let file = make_csv_file("date,category,amount\n2024-03-08,food,12.50\n");

    assert!(cli_import(&import_args(&file), &mut db).is_err());
    assert_eq!(
        db.get_value("expenses").unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn test_import_missing_file() {
    let mut db = Database::open_in_memory().unwrap();
    let args = vec!["/nonexistent/spendtui.csv".to_string()];
    assert!(cli_import(&args, &mut db).is_err());
}

// ── shellexpand ───────────────────────────────────────────────

#[test]
fn test_shellexpand_leaves_plain_paths() {
    assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
}
