use std::collections::HashMap;

/// Display name used for missing or unrecognised category identifiers.
pub const UNKNOWN_CATEGORY: &str = "Unknown category";

const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("food", "Food & Groceries"),
    ("transport", "Transport"),
    ("housing", "Housing"),
    ("utilities", "Utilities"),
    ("health", "Health"),
    ("entertainment", "Entertainment"),
    ("shopping", "Shopping"),
    ("education", "Education"),
    ("travel", "Travel"),
    ("gifts", "Gifts"),
    ("other", "Other"),
];

/// Fixed table of category identifiers and their display names.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    entries: Vec<(String, String)>,
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::from_pairs(DEFAULT_CATEGORIES.iter().copied())
    }
}

impl CategoryCatalog {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(id, name)| (id.as_str(), name.as_str()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|(known, _)| known == id)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.entries.iter().map(|(id, _)| id.as_str()).collect()
    }
}

/// Total mapping from category identifier to display name.
#[derive(Debug, Clone)]
pub struct CategoryResolver {
    names: HashMap<String, String>,
}

impl Default for CategoryResolver {
    fn default() -> Self {
        Self::new(&CategoryCatalog::default())
    }
}

impl CategoryResolver {
    pub fn new(catalog: &CategoryCatalog) -> Self {
        Self {
            names: catalog
                .entries()
                .map(|(id, name)| (id.to_string(), name.to_string()))
                .collect(),
        }
    }

    /// Never fails: `None` and unknown identifiers resolve to [`UNKNOWN_CATEGORY`].
    pub fn resolve(&self, id: Option<&str>) -> &str {
        id.and_then(|id| self.names.get(id))
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CATEGORY)
    }
}
