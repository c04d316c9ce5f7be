use std::str::FromStr;

use crate::types::internal::item::{ItemRecord, ItemStatus};

/// Status dropdown: everything, or one status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ItemStatus),
}

impl StatusFilter {
    pub fn admits(&self, status: ItemStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }

    /// The status to push down to the store, if any
    pub fn as_status(&self) -> Option<ItemStatus> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(*status),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        value.parse::<ItemStatus>().map(StatusFilter::Only)
    }
}

/// Category dropdown: everything, or exact category match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest occurrence date first
    #[default]
    MostRecent,
    Oldest,
    AlphabeticalAsc,
    AlphabeticalDesc,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::MostRecent => "recent",
            SortKey::Oldest => "oldest",
            SortKey::AlphabeticalAsc => "az",
            SortKey::AlphabeticalDesc => "za",
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "recent" => Ok(SortKey::MostRecent),
            "oldest" => Ok(SortKey::Oldest),
            "az" => Ok(SortKey::AlphabeticalAsc),
            "za" => Ok(SortKey::AlphabeticalDesc),
            other => Err(format!("expected one of recent, oldest, az, za; got '{}'", other)),
        }
    }
}

/// Everything the search screen can ask for
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchQuery {
    pub text: String,
    pub status: StatusFilter,
    pub category: CategoryFilter,
    pub location: String,
    pub date: Option<String>,
    pub sort: SortKey,
}

impl SearchQuery {
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Ordered output of the pipeline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResults {
    pub items: Vec<ItemRecord>,
    pub count: usize,
}

impl SearchResults {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        let count = items.len();
        Self { items, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// "Start your search" and "no results found" are different screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    NotSearched,
    NoResults,
    Results,
}

impl SearchState {
    pub fn of(results: Option<&SearchResults>) -> Self {
        match results {
            None => SearchState::NotSearched,
            Some(results) if results.is_empty() => SearchState::NoResults,
            Some(_) => SearchState::Results,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchState::NotSearched => "not_searched",
            SearchState::NoResults => "no_results",
            SearchState::Results => "results",
        }
    }
}
