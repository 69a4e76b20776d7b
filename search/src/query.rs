//! Search query types.

/// What the user typed into a dashboard search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Fuzzy match against entry names. An empty pattern matches everything.
    Fuzzy(String),
}

impl SearchQuery {
    pub fn fuzzy(pattern: impl Into<String>) -> Self {
        SearchQuery::Fuzzy(pattern.into())
    }

    pub fn pattern(&self) -> &str {
        match self {
            SearchQuery::Fuzzy(pattern) => pattern,
        }
    }
}
