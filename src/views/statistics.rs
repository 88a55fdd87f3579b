use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::gesture::SwipeIntent;
use super::navigation::Route;
use crate::aggregate::{compute_category_totals, recompute_total_excluding};
use crate::db::ExpenseStore;
use crate::models::{CategorySummary, Mode};

/// Per-category breakdown for the active window, plus the session-local set
/// of categories hidden from the total.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatisticsView {
    pub(crate) mode: Mode,
    pub(crate) title: &'static str,
    pub(crate) summaries: Vec<CategorySummary>,
    pub(crate) total_amount: Decimal,
    pub(crate) excluded: Vec<String>,
}

impl StatisticsView {
    pub(crate) fn new() -> Self {
        let mode = Mode::default();
        Self {
            mode,
            title: mode.title(),
            ..Self::default()
        }
    }

    /// Reload storage and recompute the current mode from scratch.
    pub(crate) fn refresh(&mut self, store: &dyn ExpenseStore, now: NaiveDateTime) {
        self.reset();
        self.recompute(store, now);
    }

    pub(crate) fn change_mode(&mut self, mode: Mode, store: &dyn ExpenseStore, now: NaiveDateTime) {
        self.mode = mode;
        self.reset();
        self.recompute(store, now);
        self.title = mode.title();
    }

    /// Hide a category from the total. Its bar and every percentage stay as
    /// they were.
    pub(crate) fn exclude_category(&mut self, category_id: &str) {
        if !self.is_excluded(category_id) {
            self.excluded.push(category_id.to_string());
        }
        self.total_amount = recompute_total_excluding(&self.summaries, &self.excluded);
        tracing::debug!(
            category = category_id,
            total = %self.total_amount,
            "Excluded category from total"
        );
    }

    pub(crate) fn is_excluded(&self, category_id: &str) -> bool {
        self.excluded.iter().any(|c| c == category_id)
    }

    /// Drill down into one category; details navigate back here.
    pub(crate) fn select_category(&self, category_id: &str) -> Route {
        Route::Details {
            category_id: Some(category_id.to_string()),
            back: Route::Statistics.target().to_string(),
        }
    }

    pub(crate) fn on_swipe(&self, intent: SwipeIntent) -> Option<Route> {
        match intent {
            SwipeIntent::Right => Some(Route::History),
            SwipeIntent::Left => Some(Route::Home),
            SwipeIntent::None => None,
        }
    }

    fn reset(&mut self) {
        self.summaries.clear();
        self.excluded.clear();
        self.total_amount = Decimal::ZERO;
    }

    fn recompute(&mut self, store: &dyn ExpenseStore, now: NaiveDateTime) {
        let records = store.load();
        let totals = compute_category_totals(&records, self.mode, now);
        self.summaries = totals.summaries;
        self.total_amount = totals.total_amount;
        tracing::info!(
            mode = %self.mode,
            records = records.len(),
            categories = self.summaries.len(),
            total = %self.total_amount,
            "Computed statistics"
        );
    }
}
