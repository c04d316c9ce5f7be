//! Search, filter and sort over an already-fetched page of items.
//!
//! Everything here is synchronous and borrows its input. The caller decides
//! which records to feed in (normally one page from the item store) and
//! gets back a new ordered vector plus its length.

use std::cmp::Reverse;

use chrono::{DateTime, NaiveDate};
use feruca::Collator;

use crate::types::internal::item::ItemRecord;
use crate::types::internal::search::{SearchQuery, SearchResults, SortKey};

/// Occurrence date as a sort and comparison key.
///
/// Values that parse become `Parsed`; anything else is kept verbatim so
/// ordering stays total.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateKey {
    Parsed(NaiveDate),
    Raw(String),
}

impl DateKey {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let parsed = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y/%m/%d"))
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(trimmed)
                    .ok()
                    .map(|dt| dt.date_naive())
            });

        match parsed {
            Some(date) => DateKey::Parsed(date),
            None => DateKey::Raw(trimmed.to_string()),
        }
    }

    fn is_raw(&self) -> bool {
        matches!(self, DateKey::Raw(_))
    }
}

/// Apply every filter stage and then sort.
pub fn run(items: &[ItemRecord], query: &SearchQuery) -> SearchResults {
    let text = needle(&query.text);
    let location = needle(&query.location);
    let date = query
        .date
        .as_deref()
        .filter(|d| !d.trim().is_empty())
        .map(DateKey::parse);

    let mut matched: Vec<ItemRecord> = items
        .iter()
        .filter(|item| matches_text(item, text.as_deref()))
        .filter(|item| query.status.admits(item.status))
        .filter(|item| query.category.admits(&item.category))
        .filter(|item| matches_location(item, location.as_deref()))
        .filter(|item| matches_date(item, date.as_ref()))
        .cloned()
        .collect();

    sort_items(&mut matched, query.sort);

    SearchResults::new(matched)
}

/// Lowercased search term, or None when the input is blank
fn needle(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_lowercase())
    }
}

/// Free-text stage: name or description contains the term
pub fn matches_text(item: &ItemRecord, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => {
            item.name.to_lowercase().contains(needle)
                || item.description.to_lowercase().contains(needle)
        }
    }
}

pub fn matches_location(item: &ItemRecord, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => item.location.to_lowercase().contains(needle),
    }
}

pub fn matches_date(item: &ItemRecord, wanted: Option<&DateKey>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => DateKey::parse(&item.occurred_on) == *wanted,
    }
}

/// Stable sort in place. Unparseable dates go last in both date orders.
/// Names compare with the Unicode root collation, whose tie-break keeps the
/// order total, so `za` is always the exact reverse of `az`.
pub fn sort_items(items: &mut [ItemRecord], sort: SortKey) {
    match sort {
        SortKey::MostRecent => items.sort_by_cached_key(|item| {
            let key = DateKey::parse(&item.occurred_on);
            (key.is_raw(), Reverse(key))
        }),
        SortKey::Oldest => items.sort_by_cached_key(|item| {
            let key = DateKey::parse(&item.occurred_on);
            (key.is_raw(), key)
        }),
        SortKey::AlphabeticalAsc => {
            let mut collator = Collator::default();
            items.sort_by(|a, b| collator.collate(a.name.as_str(), b.name.as_str()));
        }
        SortKey::AlphabeticalDesc => {
            let mut collator = Collator::default();
            items.sort_by(|a, b| collator.collate(b.name.as_str(), a.name.as_str()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_records;
    use crate::types::internal::item::ItemStatus;
    use crate::types::internal::search::{CategoryFilter, StatusFilter};

    fn names(results: &SearchResults) -> Vec<&str> {
        results.items.iter().map(|i| i.name.as_str()).collect()
    }

    fn dates(results: &SearchResults) -> Vec<&str> {
        results.items.iter().map(|i| i.occurred_on.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything_newest_first() {
        let items = sample_records();
        let results = run(&items, &SearchQuery::default());

        assert_eq!(results.count, items.len());
        let mut expected: Vec<&str> = items.iter().map(|i| i.occurred_on.as_str()).collect();
        expected.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates(&results), expected);
    }

    #[test]
    fn test_input_is_untouched() {
        let items = sample_records();
        let before = items.clone();
        let _ = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalAsc));
        assert_eq!(items, before);
    }

    #[test]
    fn test_text_matches_name_or_description_case_insensitively() {
        let items = sample_records();
        let results = run(&items, &SearchQuery::default().text("WALLET"));
        assert_eq!(names(&results), vec!["Black Wallet"]);
        assert_eq!(results.count, 1);

        let results = run(&items, &SearchQuery::default().text("red collar"));
        assert_eq!(names(&results), vec!["Golden Retriever Dog"]);
    }

    #[test]
    fn test_text_results_all_contain_term() {
        let items = sample_records();
        let results = run(&items, &SearchQuery::default().text("lost"));

        assert!(results.count > 0);
        for item in &results.items {
            assert!(
                item.name.to_lowercase().contains("lost")
                    || item.description.to_lowercase().contains("lost")
            );
        }
    }

    #[test]
    fn test_whitespace_query_counts_as_empty() {
        let items = sample_records();
        let results = run(&items, &SearchQuery::default().text("   ").location("\t"));
        assert_eq!(results.count, items.len());
    }

    #[test]
    fn test_wallet_scenario() {
        let items: Vec<ItemRecord> = sample_records()
            .into_iter()
            .filter(|i| i.name == "iPhone 13 Pro" || i.name == "Black Wallet")
            .collect();
        assert_eq!(items.len(), 2);

        let results = run(&items, &SearchQuery::default().text("wallet"));
        assert_eq!(names(&results), vec!["Black Wallet"]);
        assert_eq!(results.count, 1);
    }

    #[test]
    fn test_status_filter_keeps_only_found() {
        let items: Vec<ItemRecord> = sample_records().into_iter().take(6).collect();
        assert_eq!(items.iter().filter(|i| i.status == ItemStatus::Found).count(), 2);

        let query = SearchQuery::default()
            .status(StatusFilter::Only(ItemStatus::Found))
            .category(CategoryFilter::All);
        let results = run(&items, &query);

        assert_eq!(results.count, 2);
        assert!(results.items.iter().all(|i| i.status == ItemStatus::Found));
    }

    #[test]
    fn test_category_filter_is_exact() {
        let items = sample_records();
        let results = run(
            &items,
            &SearchQuery::default().category(CategoryFilter::from("electronics")),
        );
        assert_eq!(names(&results), vec!["iPhone 13 Pro", "MacBook Pro Laptop"]);

        let results = run(
            &items,
            &SearchQuery::default().category(CategoryFilter::from("electro")),
        );
        assert!(results.is_empty());
    }

    #[test]
    fn test_oldest_sort_scenario() {
        let items: Vec<ItemRecord> = sample_records().into_iter().take(6).collect();
        let results = run(&items, &SearchQuery::default().sort(SortKey::Oldest));

        assert_eq!(
            dates(&results),
            vec![
                "2023-05-01",
                "2023-05-02",
                "2023-05-03",
                "2023-05-04",
                "2023-05-05",
                "2023-05-06"
            ]
        );
    }

    #[test]
    fn test_location_substring_scenario() {
        let items = sample_records();
        let results = run(&items, &SearchQuery::default().location("downtown"));
        assert_eq!(names(&results), vec!["Golden Retriever Dog"]);
        assert_eq!(results.items[0].location, "Downtown, Main Street");
    }

    #[test]
    fn test_date_filter_normalizes_formats() {
        let items = sample_records();

        let results = run(&items, &SearchQuery::default().date("2023-05-03"));
        assert_eq!(names(&results), vec!["Black Wallet"]);

        let results = run(&items, &SearchQuery::default().date("2023/05/03"));
        assert_eq!(names(&results), vec!["Black Wallet"]);

        let results = run(&items, &SearchQuery::default().date("2023-05-03T09:30:00Z"));
        assert_eq!(names(&results), vec!["Black Wallet"]);
    }

    #[test]
    fn test_unparseable_date_filter_compares_raw() {
        let mut items = sample_records();
        items[0].occurred_on = "last week".to_string();

        let results = run(&items, &SearchQuery::default().date("last week"));
        assert_eq!(names(&results), vec!["iPhone 13 Pro"]);

        let results = run(&items, &SearchQuery::default().date("yesterday"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_filters_are_idempotent() {
        let items = sample_records();
        let query = SearchQuery::default()
            .text("lost")
            .status(StatusFilter::Only(ItemStatus::Lost))
            .sort(SortKey::AlphabeticalAsc);

        let once = run(&items, &query);
        let twice = run(&once.items, &query);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_az_and_za_are_reverses() {
        let items = sample_records();
        let az = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalAsc));
        let za = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalDesc));

        let mut reversed = names(&za);
        reversed.reverse();
        assert_eq!(names(&az), reversed);
        assert_eq!(names(&az)[0], "Black Wallet");
    }

    #[test]
    fn test_alphabetical_sort_folds_case() {
        let mut items = sample_records();
        items[0].name = "apple AirPods".to_string();
        items[1].name = "Zebra Plush".to_string();

        let results = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalAsc));
        assert_eq!(names(&results)[0], "apple AirPods");
        assert_eq!(*names(&results).last().unwrap(), "Zebra Plush");
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let mut items = sample_records();
        items.truncate(3);
        items[0].name = "Zebra Plush".to_string();
        items[1].name = "Écharpe rouge".to_string();
        items[2].name = "Dé à coudre".to_string();

        let az = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalAsc));
        assert_eq!(names(&az), vec!["Dé à coudre", "Écharpe rouge", "Zebra Plush"]);

        let za = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalDesc));
        assert_eq!(names(&za), vec!["Zebra Plush", "Écharpe rouge", "Dé à coudre"]);
    }

    #[test]
    fn test_names_differing_only_in_case_keep_a_total_order() {
        let mut items = sample_records();
        items.truncate(2);
        items[0].name = "black wallet".to_string();
        items[1].name = "Black Wallet".to_string();

        let az = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalAsc));
        let za = run(&items, &SearchQuery::default().sort(SortKey::AlphabeticalDesc));

        let mut reversed = names(&za);
        reversed.reverse();
        assert_eq!(names(&az), reversed);
    }

    #[test]
    fn test_date_sort_is_stable_for_ties() {
        let mut items = sample_records();
        for item in items.iter_mut() {
            item.occurred_on = "2023-05-01".to_string();
        }
        let input_order: Vec<String> = items.iter().map(|i| i.id.clone()).collect();

        for sort in [SortKey::MostRecent, SortKey::Oldest] {
            let results = run(&items, &SearchQuery::default().sort(sort));
            let ids: Vec<String> = results.items.iter().map(|i| i.id.clone()).collect();
            assert_eq!(ids, input_order);
        }
    }

    #[test]
    fn test_malformed_dates_sort_last() {
        let mut items = sample_records();
        items[2].occurred_on = "sometime".to_string();

        for sort in [SortKey::MostRecent, SortKey::Oldest] {
            let results = run(&items, &SearchQuery::default().sort(sort));
            assert_eq!(results.items.last().unwrap().occurred_on, "sometime");
            assert_eq!(results.count, items.len());
        }
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let items = sample_records();
        let results = run(&items, &SearchQuery::default().text("submarine"));
        assert!(results.is_empty());
        assert_eq!(results.count, 0);
    }
}
