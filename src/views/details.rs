use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::gesture::SwipeIntent;
use super::navigation::{Params, Route, BACK_URL_PARAM, CATEGORY_ID_PARAM};
use crate::aggregate::compute_window_totals;
use crate::categories::CategoryResolver;
use crate::db::ExpenseStore;

/// Day, month and year sums for the category named in the request.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DetailsView {
    pub(crate) category_id: Option<String>,
    pub(crate) selected_category_name: String,
    pub(crate) amount_for_day: Decimal,
    pub(crate) amount_for_month: Decimal,
    pub(crate) amount_for_year: Decimal,
    pub(crate) back_target: String,
}

impl DetailsView {
    /// Build from the incoming request parameters (`category-id`, `back-url`).
    pub(crate) fn open(
        params: &Params,
        store: &dyn ExpenseStore,
        resolver: &CategoryResolver,
        now: NaiveDateTime,
    ) -> Self {
        let category_id = params.get(CATEGORY_ID_PARAM).cloned();
        let back_target = params
            .get(BACK_URL_PARAM)
            .cloned()
            .unwrap_or_else(|| Route::Home.target().to_string());

        let totals = match &category_id {
            Some(id) => compute_window_totals(&store.load(), id, now),
            None => Default::default(),
        };

        Self {
            selected_category_name: resolver.resolve(category_id.as_deref()).to_string(),
            category_id,
            amount_for_day: totals.day,
            amount_for_month: totals.month,
            amount_for_year: totals.year,
            back_target,
        }
    }

    pub(crate) fn back_route(&self) -> Route {
        Route::parse(&self.back_target, &Params::new())
    }

    /// Any horizontal swipe goes back, whichever direction it was.
    pub(crate) fn on_swipe(&self, intent: SwipeIntent) -> Option<Route> {
        match intent {
            SwipeIntent::Left | SwipeIntent::Right => Some(self.back_route()),
            SwipeIntent::None => None,
        }
    }
}
