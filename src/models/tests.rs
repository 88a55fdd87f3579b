#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

use super::*;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

// ── ExpenseRecord ─────────────────────────────────────────────

#[test]
fn test_record_new() {
    let record = ExpenseRecord::new(dec!(12.50), "food", at(2024, 3, 8));
    assert_eq!(record.amount, dec!(12.50));
    assert_eq!(record.category, "food");
    assert_eq!(record.date, at(2024, 3, 8));
}

#[test]
fn test_same_day_ignores_time_of_day() {
    let record = ExpenseRecord::new(dec!(1), "food", at(2024, 3, 8));
    let late = NaiveDate::from_ymd_opt(2024, 3, 8)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();
    assert!(record.is_same_day(late));
}

#[test]
fn test_same_month_not_same_day() {
    let record = ExpenseRecord::new(dec!(1), "food", at(2024, 3, 1));
    assert!(!record.is_same_day(at(2024, 3, 8)));
    assert!(record.is_same_month(at(2024, 3, 8)));
    assert!(record.is_same_year(at(2024, 3, 8)));
}

#[test]
fn test_same_day_number_other_month() {
    let record = ExpenseRecord::new(dec!(1), "food", at(2024, 2, 8));
    assert!(!record.is_same_day(at(2024, 3, 8)));
    assert!(!record.is_same_month(at(2024, 3, 8)));
    assert!(record.is_same_year(at(2024, 3, 8)));
}

#[test]
fn test_same_month_other_year() {
    let record = ExpenseRecord::new(dec!(1), "food", at(2023, 3, 8));
    assert!(!record.is_same_month(at(2024, 3, 8)));
    assert!(!record.is_same_year(at(2024, 3, 8)));
}

// ── Mode ──────────────────────────────────────────────────────

#[test]
fn test_mode_default_is_today() {
    assert_eq!(Mode::default(), Mode::Today);
}

#[test]
fn test_mode_parse() {
    assert_eq!(Mode::parse("today"), Some(Mode::Today));
    assert_eq!(Mode::parse("T"), Some(Mode::Today));
    assert_eq!(Mode::parse("week"), Some(Mode::Week));
    assert_eq!(Mode::parse(" w "), Some(Mode::Week));
    assert_eq!(Mode::parse("MONTH"), Some(Mode::Month));
    assert_eq!(Mode::parse("m"), Some(Mode::Month));
    assert_eq!(Mode::parse("year"), None);
}

#[test]
fn test_mode_key_roundtrip() {
    for mode in Mode::all() {
        assert_eq!(Mode::parse(mode.key()), Some(*mode));
    }
}

#[test]
fn test_mode_titles_distinct() {
    let titles: Vec<&str> = Mode::all().iter().map(|m| m.title()).collect();
    assert_eq!(titles, vec!["Today", "This week", "This month"]);
}

// ── Rgb ───────────────────────────────────────────────────────

#[test]
fn test_rgb_display() {
    assert_eq!(format!("{}", Rgb::new(90, 128, 0)), "rgb(90, 128, 0)");
}

#[test]
fn test_window_totals_default_zero() {
    let totals = WindowTotals::default();
    assert!(totals.day.is_zero());
    assert!(totals.month.is_zero());
    assert!(totals.year.is_zero());
}

// ── ExpenseRecord::parse_entry ────────────────────────────────

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 8)
        .unwrap()
        .and_hms_opt(9, 45, 0)
        .unwrap()
}

#[test]
fn test_parse_entry_defaults_to_now() {
    let record = ExpenseRecord::parse_entry("12.50 food", now()).unwrap();
    assert_eq!(record, ExpenseRecord::new(dec!(12.50), "food", now()));
}

#[test]
fn test_parse_entry_with_date_keeps_time_of_day() {
    let record = ExpenseRecord::parse_entry("3 transport 2024-03-01", now()).unwrap();
    assert_eq!(
        record.date,
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 45, 0)
            .unwrap()
    );
}

#[test]
fn test_parse_entry_with_date_and_time() {
    let record = ExpenseRecord::parse_entry("3 transport 2024-03-01 18:05", now()).unwrap();
    assert_eq!(
        record.date,
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(18, 5, 0)
            .unwrap()
    );
}

#[test]
fn test_parse_entry_accepts_comma_decimal() {
    let record = ExpenseRecord::parse_entry("4,20 food", now()).unwrap();
    assert_eq!(record.amount, dec!(4.20));
}

#[test]
fn test_parse_entry_allows_zero() {
    let record = ExpenseRecord::parse_entry("0 gifts", now()).unwrap();
    assert!(record.amount.is_zero());
}

#[test]
fn test_parse_entry_rejects_bad_input() {
    assert!(ExpenseRecord::parse_entry("", now()).is_err());
    assert!(ExpenseRecord::parse_entry("12", now()).is_err());
    assert!(ExpenseRecord::parse_entry("abc food", now()).is_err());
    assert!(ExpenseRecord::parse_entry("-5 food", now()).is_err());
    assert!(ExpenseRecord::parse_entry("5 food 2024-13-01", now()).is_err());
    assert!(ExpenseRecord::parse_entry("5 food 2024-03-01 25:00", now()).is_err());
    assert!(ExpenseRecord::parse_entry("5 food 2024-03-01 10:00 extra", now()).is_err());
}
