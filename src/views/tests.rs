#![allow(clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::navigation::{BACK_URL_PARAM, CATEGORY_ID_PARAM};
use super::*;
use crate::categories::{CategoryResolver, UNKNOWN_CATEGORY};
use crate::db::{Database, ExpenseStore};
use crate::models::{ExpenseRecord, Mode};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(14, 0, 0)
        .unwrap()
}

// Friday
fn now() -> NaiveDateTime {
    at(2024, 3, 8)
}

fn store_with(records: &[ExpenseRecord]) -> Database {
    let mut db = Database::open_in_memory().unwrap();
    db.persist(records).unwrap();
    db
}

fn sample_store() -> Database {
    store_with(&[
        ExpenseRecord::new(dec!(10), "food", now()),
        ExpenseRecord::new(dec!(20), "food", now()),
        ExpenseRecord::new(dec!(5), "transport", now()),
        ExpenseRecord::new(dec!(40), "housing", at(2024, 3, 5)),
        ExpenseRecord::new(dec!(100), "travel", at(2024, 3, 1)),
        ExpenseRecord::new(dec!(7), "food", at(2024, 1, 20)),
    ])
}

fn categories(view: &StatisticsView) -> Vec<&str> {
    view.summaries.iter().map(|s| s.category.as_str()).collect()
}

#[derive(Default)]
struct RecordingNavigator {
    calls: Vec<(String, Params)>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, target: &str, params: &Params) {
        self.calls.push((target.to_string(), params.clone()));
    }
}

// ── StatisticsView ────────────────────────────────────────────

#[test]
fn test_new_view_defaults() {
    let view = StatisticsView::new();
    assert_eq!(view.mode, Mode::Today);
    assert_eq!(view.title, Mode::Today.title());
    assert!(view.summaries.is_empty());
    assert!(view.excluded.is_empty());
    assert_eq!(view.total_amount, Decimal::ZERO);
}

#[test]
fn test_refresh_today() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.refresh(&store, now());

    assert_eq!(categories(&view), vec!["transport", "food"]);
    assert_eq!(view.total_amount, dec!(35));
}

#[test]
fn test_change_mode_week() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.change_mode(Mode::Week, &store, now());

    assert_eq!(view.mode, Mode::Week);
    assert_eq!(view.title, "This week");
    assert_eq!(categories(&view), vec!["transport", "food", "housing"]);
    assert_eq!(view.total_amount, dec!(75));
}

#[test]
fn test_change_mode_month() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.change_mode(Mode::Month, &store, now());

    assert_eq!(view.title, "This month");
    assert_eq!(
        categories(&view),
        vec!["transport", "food", "housing", "travel"]
    );
    assert_eq!(view.total_amount, dec!(175));
}

#[test]
fn test_refresh_keeps_current_mode() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.change_mode(Mode::Month, &store, now());
    view.refresh(&store, now());
    assert_eq!(view.mode, Mode::Month);
    assert_eq!(view.total_amount, dec!(175));
}

#[test]
fn test_recompute_does_not_accumulate() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.refresh(&store, now());
    view.refresh(&store, now());
    view.change_mode(Mode::Today, &store, now());
    assert_eq!(view.summaries.len(), 2);
    assert_eq!(view.total_amount, dec!(35));
}

#[test]
fn test_refresh_sees_new_records() {
    let mut store = sample_store();
    let mut view = StatisticsView::new();
    view.refresh(&store, now());
    store
        .append(ExpenseRecord::new(dec!(1.5), "health", now()))
        .unwrap();
    view.refresh(&store, now());
    assert_eq!(view.total_amount, dec!(36.5));
    assert_eq!(categories(&view)[0], "health");
}

#[test]
fn test_exclude_category_updates_total_only() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.refresh(&store, now());
    let before = view.summaries.clone();

    view.exclude_category("food");

    assert_eq!(view.total_amount, dec!(5));
    assert!(view.is_excluded("food"));
    // Bars and their percentages are left as computed.
    assert_eq!(view.summaries, before);
    let amounts: Decimal = view.summaries.iter().map(|s| s.amount).sum();
    assert_ne!(amounts, view.total_amount);
}

#[test]
fn test_exclusions_accumulate() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.change_mode(Mode::Month, &store, now());
    view.exclude_category("travel");
    view.exclude_category("housing");
    assert_eq!(view.total_amount, dec!(35));
    view.exclude_category("housing");
    assert_eq!(view.excluded, vec!["travel".to_string(), "housing".to_string()]);
    assert_eq!(view.total_amount, dec!(35));
}

#[test]
fn test_exclude_unknown_category_keeps_total() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.refresh(&store, now());
    view.exclude_category("nope");
    assert_eq!(view.total_amount, dec!(35));
}

#[test]
fn test_refresh_clears_exclusions() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.refresh(&store, now());
    view.exclude_category("food");
    view.refresh(&store, now());
    assert!(view.excluded.is_empty());
    assert_eq!(view.total_amount, dec!(35));
}

#[test]
fn test_change_mode_clears_exclusions() {
    let store = sample_store();
    let mut view = StatisticsView::new();
    view.refresh(&store, now());
    view.exclude_category("food");
    view.change_mode(Mode::Week, &store, now());
    assert!(view.excluded.is_empty());
    assert_eq!(view.total_amount, dec!(75));
}

#[test]
fn test_empty_store_gives_empty_view() {
    let store = Database::open_in_memory().unwrap();
    let mut view = StatisticsView::new();
    view.change_mode(Mode::Month, &store, now());
    assert!(view.summaries.is_empty());
    assert_eq!(view.total_amount, Decimal::ZERO);
}

#[test]
fn test_select_category_routes_to_details() {
    let view = StatisticsView::new();
    let route = view.select_category("food");
    assert_eq!(
        route,
        Route::Details {
            category_id: Some("food".into()),
            back: "/statistics".into(),
        }
    );
    assert_eq!(route.target(), "/details");
    let params = route.params();
    assert_eq!(params.get(CATEGORY_ID_PARAM).unwrap(), "food");
    assert_eq!(params.get(BACK_URL_PARAM).unwrap(), "/statistics");
}

#[test]
fn test_statistics_swipes_are_directional() {
    let view = StatisticsView::new();
    assert_eq!(view.on_swipe(SwipeIntent::Right), Some(Route::History));
    assert_eq!(view.on_swipe(SwipeIntent::Left), Some(Route::Home));
    assert_eq!(view.on_swipe(SwipeIntent::None), None);
}

// ── DetailsView ───────────────────────────────────────────────

fn details_params(category: &str, back: &str) -> Params {
    StatisticsView::new()
        .select_category(category)
        .params()
        .into_iter()
        .map(|(k, v)| if k == BACK_URL_PARAM { (k, back.to_string()) } else { (k, v) })
        .collect()
}

#[test]
fn test_details_window_totals() {
    let store = sample_store();
    let resolver = CategoryResolver::default();
    let view = DetailsView::open(&details_params("food", "/statistics"), &store, &resolver, now());

    assert_eq!(view.category_id.as_deref(), Some("food"));
    assert_eq!(view.selected_category_name, "Food & Groceries");
    assert_eq!(view.amount_for_day, dec!(30));
    assert_eq!(view.amount_for_month, dec!(30));
    assert_eq!(view.amount_for_year, dec!(37));
    assert_eq!(view.back_target, "/statistics");
}

#[test]
fn test_details_unknown_category() {
    let store = sample_store();
    let resolver = CategoryResolver::default();
    let view = DetailsView::open(&details_params("mystery", "/"), &store, &resolver, now());

    assert_eq!(view.selected_category_name, UNKNOWN_CATEGORY);
    assert_eq!(view.amount_for_year, Decimal::ZERO);
}

#[test]
fn test_details_missing_params() {
    let store = sample_store();
    let resolver = CategoryResolver::default();
    let view = DetailsView::open(&Params::new(), &store, &resolver, now());

    assert!(view.category_id.is_none());
    assert_eq!(view.selected_category_name, UNKNOWN_CATEGORY);
    assert_eq!(view.amount_for_day, Decimal::ZERO);
    assert_eq!(view.back_target, "/");
    assert_eq!(view.back_route(), Route::Home);
}

#[test]
fn test_details_swipe_goes_back_either_way() {
    let store = sample_store();
    let resolver = CategoryResolver::default();
    let view = DetailsView::open(&details_params("food", "/statistics"), &store, &resolver, now());

    assert_eq!(view.on_swipe(SwipeIntent::Left), Some(Route::Statistics));
    assert_eq!(view.on_swipe(SwipeIntent::Right), Some(Route::Statistics));
    assert_eq!(view.on_swipe(SwipeIntent::None), None);
}

// ── Route ─────────────────────────────────────────────────────

#[test]
fn test_route_parse_targets() {
    let none = Params::new();
    assert_eq!(Route::parse("/", &none), Route::Home);
    assert_eq!(Route::parse("", &none), Route::Home);
    assert_eq!(Route::parse("/history", &none), Route::History);
    assert_eq!(Route::parse("/statistics/", &none), Route::Statistics);
    assert_eq!(Route::parse("/settings", &none), Route::Home);
}

#[test]
fn test_route_details_roundtrip_through_params() {
    let route = Route::Details {
        category_id: Some("transport".into()),
        back: "/history".into(),
    };
    assert_eq!(Route::parse(route.target(), &route.params()), route);
}

#[test]
fn test_route_details_without_back_url_returns_home() {
    let mut params = Params::new();
    params.insert(CATEGORY_ID_PARAM.into(), "food".into());
    assert_eq!(
        Route::parse("/details", &params),
        Route::Details {
            category_id: Some("food".into()),
            back: "/".into(),
        }
    );
}

#[test]
fn test_route_dispatch_calls_navigator() {
    let mut nav = RecordingNavigator::default();
    StatisticsView::new().select_category("food").dispatch(&mut nav);
    Route::Home.dispatch(&mut nav);

    assert_eq!(nav.calls.len(), 2);
    assert_eq!(nav.calls[0].0, "/details");
    assert_eq!(nav.calls[0].1.get(CATEGORY_ID_PARAM).unwrap(), "food");
    assert_eq!(nav.calls[1], ("/".to_string(), Params::new()));
}

// ── Gestures ──────────────────────────────────────────────────

#[test]
fn test_swipe_right() {
    assert_eq!(
        swipe_intent(Point::new(0, 0), Point::new(51, 10)),
        SwipeIntent::Right
    );
}

#[test]
fn test_swipe_left() {
    assert_eq!(
        swipe_intent(Point::new(100, 0), Point::new(40, -5)),
        SwipeIntent::Left
    );
}

#[test]
fn test_swipe_threshold_is_exclusive() {
    assert_eq!(
        swipe_intent(Point::new(0, 0), Point::new(50, 0)),
        SwipeIntent::None
    );
    assert_eq!(
        swipe_intent(Point::new(0, 0), Point::new(-50, 0)),
        SwipeIntent::None
    );
}

#[test]
fn test_swipe_requires_horizontal_dominance() {
    assert_eq!(
        swipe_intent(Point::new(0, 0), Point::new(80, 90)),
        SwipeIntent::None
    );
    assert_eq!(
        swipe_intent(Point::new(0, 0), Point::new(-80, 80)),
        SwipeIntent::None
    );
}

#[test]
fn test_swipe_from_terminal_cells() {
    // 7 columns at 8 units each is 56 units.
    let start = Point::from_cell(10, 5);
    let end = Point::from_cell(17, 5);
    assert_eq!(swipe_intent(start, end), SwipeIntent::Right);
    // 6 columns is 48 units, under the threshold.
    assert_eq!(
        swipe_intent(Point::from_cell(16, 5), Point::from_cell(10, 5)),
        SwipeIntent::None
    );
}
