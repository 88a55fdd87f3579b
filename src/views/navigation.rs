use std::collections::BTreeMap;

pub(crate) const CATEGORY_ID_PARAM: &str = "category-id";
pub(crate) const BACK_URL_PARAM: &str = "back-url";

pub(crate) type Params = BTreeMap<String, String>;

/// Receives navigation requests. Fire-and-forget.
pub(crate) trait Navigator {
    fn navigate(&mut self, target: &str, params: &Params);
}

/// A navigation destination, convertible to and from a target path plus query
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Route {
    Home,
    History,
    Statistics,
    Details {
        category_id: Option<String>,
        back: String,
    },
}

impl Route {
    pub(crate) fn target(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::History => "/history",
            Self::Statistics => "/statistics",
            Self::Details { .. } => "/details",
        }
    }

    pub(crate) fn params(&self) -> Params {
        let mut params = Params::new();
        if let Self::Details { category_id, back } = self {
            if let Some(id) = category_id {
                params.insert(CATEGORY_ID_PARAM.to_string(), id.clone());
            }
            params.insert(BACK_URL_PARAM.to_string(), back.clone());
        }
        params
    }

    /// Unknown targets resolve to [`Route::Home`]. A details route without a
    /// back URL returns home.
    pub(crate) fn parse(target: &str, params: &Params) -> Self {
        match target.trim_end_matches('/') {
            "" => Self::Home,
            "/history" => Self::History,
            "/statistics" => Self::Statistics,
            "/details" => Self::Details {
                category_id: params.get(CATEGORY_ID_PARAM).cloned(),
                back: params
                    .get(BACK_URL_PARAM)
                    .cloned()
                    .unwrap_or_else(|| Self::Home.target().to_string()),
            },
            _ => Self::Home,
        }
    }

    /// Send this route to a navigator.
    pub(crate) fn dispatch(&self, navigator: &mut dyn Navigator) {
        navigator.navigate(self.target(), &self.params());
    }
}
