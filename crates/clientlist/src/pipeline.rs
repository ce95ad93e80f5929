//! # Filter + Sort Pipeline
//!
//! Computes the displayed record sequence from four inputs: the full record set, the
//! active [`Tab`], the search query, and a snapshot of the sort criteria.
//!
//! ## Stages
//!
//! Each stage consumes the previous stage's output:
//!
//! 1. **Category filter**: `Tab::All` passes everything, otherwise only records of
//!    the tab's category survive.
//! 2. **Text filter**: an empty query passes everything, otherwise a record survives
//!    when the lower-cased query is a substring of its lower-cased name, its
//!    lower-cased email, or its id rendered as text.
//! 3. **Multi-key sort**: one stable sort using [`crate::sorting::compare_records`].
//!    No criteria means no reordering.
//!
//! Filtering never reorders, so with no criteria the output follows input order.
//!
//! ## Purity
//!
//! [`run`] borrows its inputs and returns references into `records`. Calling it twice
//! with the same inputs yields the same sequence, so callers can re-run it on every
//! input change without tracking whether anything actually moved.

use crate::model::{ClientRecord, SortCriterion, Tab};
use crate::sorting::sort_by_criteria;

/// Run all three stages and return the rows to display.
pub fn run<'a>(
    records: &'a [ClientRecord],
    tab: Tab,
    query: &str,
    criteria: &[SortCriterion],
) -> Vec<&'a ClientRecord> {
    // 1. Category
    let by_tab = filter_by_tab(records.iter(), tab);

    // 2. Search
    let mut rows = filter_by_query(by_tab, query);

    // 3. Sort
    sort_by_criteria(&mut rows, criteria);

    rows
}

/// Keep records belonging to the tab's category.
pub fn filter_by_tab<'a, I>(records: I, tab: Tab) -> Vec<&'a ClientRecord>
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    records
        .into_iter()
        .filter(|record| tab.matches(record))
        .collect()
}

/// Keep records whose name, email or id contains `query` (case-insensitive).
pub fn filter_by_query<'a, I>(records: I, query: &str) -> Vec<&'a ClientRecord>
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    if query.is_empty() {
        return records.into_iter().collect();
    }

    let query_lower = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches_query(record, &query_lower))
        .collect()
}

/// Substring test against an already lower-cased query.
pub fn matches_query(record: &ClientRecord, query_lower: &str) -> bool {
    record.name.to_lowercase().contains(query_lower)
        || record.email.to_lowercase().contains(query_lower)
        || record.id.to_string().contains(query_lower)
}
