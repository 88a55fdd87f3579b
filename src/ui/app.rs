use chrono::NaiveDateTime;

use crate::categories::{CategoryCatalog, CategoryResolver};
use crate::db::ExpenseStore;
use crate::models::ExpenseRecord;
use crate::views::{DetailsView, Navigator, Params, Point, Route, StatisticsView, SwipeIntent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Home,
    History,
    Statistics,
    Details,
}

impl Screen {
    /// Screens reachable from the tab bar. Details is only reached by drilling down.
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Home, Self::History, Self::Statistics]
    }

    pub(crate) fn route(&self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::History => Route::History,
            Self::Statistics | Self::Details => Route::Statistics,
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Home => write!(f, "Home"),
            Self::History => write!(f, "History"),
            Self::Statistics => write!(f, "Statistics"),
            Self::Details => write!(f, "Details"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) catalog: CategoryCatalog,
    pub(crate) resolver: CategoryResolver,

    // Home / History
    pub(crate) records: Vec<ExpenseRecord>,
    pub(crate) history_index: usize,
    pub(crate) history_scroll: usize,

    // Statistics
    pub(crate) statistics: StatisticsView,
    pub(crate) statistics_index: usize,

    // Details
    pub(crate) details: Option<DetailsView>,

    // Navigation requested but not yet applied
    pub(crate) pending_navigation: Option<(String, Params)>,
    // Mouse press position of an in-progress drag
    pub(crate) drag_start: Option<Point>,

    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        let catalog = CategoryCatalog::default();
        let resolver = CategoryResolver::new(&catalog);
        Self {
            running: true,
            screen: Screen::Home,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            catalog,
            resolver,

            records: Vec::new(),
            history_index: 0,
            history_scroll: 0,

            statistics: StatisticsView::new(),
            statistics_index: 0,

            details: None,

            pending_navigation: None,
            drag_start: None,

            visible_rows: 20,
        }
    }

    /// Apply the most recent navigation request, if any.
    pub(crate) fn process_navigation(&mut self, store: &dyn ExpenseStore, now: NaiveDateTime) {
        if let Some((target, params)) = self.pending_navigation.take() {
            let route = Route::parse(&target, &params);
            tracing::debug!(%target, ?params, "Navigating");
            self.activate(route, store, now);
        }
    }

    /// Show the screen for `route`, initialising its view from storage.
    pub(crate) fn activate(&mut self, route: Route, store: &dyn ExpenseStore, now: NaiveDateTime) {
        match route {
            Route::Home => {
                self.screen = Screen::Home;
                self.reload_records(store);
            }
            Route::History => {
                self.screen = Screen::History;
                self.reload_records(store);
            }
            Route::Statistics => {
                self.screen = Screen::Statistics;
                self.statistics = StatisticsView::new();
                self.statistics.refresh(store, now);
                self.statistics_index = 0;
            }
            Route::Details { .. } => {
                self.details = Some(DetailsView::open(
                    &route.params(),
                    store,
                    &self.resolver,
                    now,
                ));
                self.screen = Screen::Details;
            }
        }
    }

    /// Recompute whatever the current screen shows.
    pub(crate) fn refresh_current(&mut self, store: &dyn ExpenseStore, now: NaiveDateTime) {
        match self.screen {
            Screen::Home | Screen::History => self.reload_records(store),
            Screen::Statistics => {
                self.statistics.refresh(store, now);
                self.statistics_index = 0;
            }
            Screen::Details => {
                let route = self.details.as_ref().map(|d| Route::Details {
                    category_id: d.category_id.clone(),
                    back: d.back_target.clone(),
                });
                if let Some(route) = route {
                    self.activate(route, store, now);
                }
            }
        }
    }

    pub(crate) fn reload_records(&mut self, store: &dyn ExpenseStore) {
        let mut records = store.load();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        self.records = records;
        if self.history_index >= self.records.len() {
            self.history_index = self.records.len().saturating_sub(1);
        }
        self.history_scroll = self.history_scroll.min(self.history_index);
    }

    /// Route for a swipe on the current screen.
    pub(crate) fn swipe_route(&self, intent: SwipeIntent) -> Option<Route> {
        match self.screen {
            Screen::Statistics => self.statistics.on_swipe(intent),
            Screen::Details => self.details.as_ref().and_then(|d| d.on_swipe(intent)),
            Screen::Home | Screen::History => None,
        }
    }

    pub(crate) fn handle_swipe(&mut self, intent: SwipeIntent) {
        if let Some(route) = self.swipe_route(intent) {
            route.dispatch(self);
        }
    }

    pub(crate) fn selected_category(&self) -> Option<&str> {
        self.statistics
            .summaries
            .get(self.statistics_index)
            .map(|s| s.category.as_str())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

impl Navigator for App {
    fn navigate(&mut self, target: &str, params: &Params) {
        self.pending_navigation = Some((target.to_string(), params.clone()));
    }
}
