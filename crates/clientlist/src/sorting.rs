//! Record comparators for the multi-key sort.
//!
//! [`compare_records`] walks the criteria in precedence order and returns the first
//! non-equal field comparison, reversed for descending criteria. A timestamp that
//! cannot be parsed makes its criterion a tie, so the next criterion (or the stable
//! input order) decides.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::model::{ClientRecord, SortCriterion, SortDirection, SortField};

/// Compare two records under the given criteria list.
pub fn compare_records(
    a: &ClientRecord,
    b: &ClientRecord,
    criteria: &[SortCriterion],
) -> Ordering {
    for criterion in criteria {
        let ord = compare_field(a, b, criterion.field);
        if ord != Ordering::Equal {
            return if criterion.direction == SortDirection::Descending {
                ord.reverse()
            } else {
                ord
            };
        }
    }
    Ordering::Equal
}

/// Ascending comparison of a single field.
pub fn compare_field(a: &ClientRecord, b: &ClientRecord, field: SortField) -> Ordering {
    match field {
        SortField::Name => locale_cmp(&a.name, &b.name),
        SortField::Id => a.id.cmp(&b.id),
        SortField::CreatedAt => compare_timestamps(&a.created_at, &b.created_at),
        SortField::UpdatedAt => compare_timestamps(&a.updated_at, &b.updated_at),
    }
}

/// Sort a view of records in place. The sort is stable: records tied on every
/// criterion keep their relative order.
pub fn sort_by_criteria(items: &mut [&ClientRecord], criteria: &[SortCriterion]) {
    if criteria.is_empty() {
        return;
    }
    merge_sort(items, &mut |a: &&ClientRecord, b: &&ClientRecord| {
        compare_records(a, b, criteria)
    });
}

/// Stable top-down merge sort.
///
/// A malformed timestamp ties with every other value, so the composite comparator is
/// not a total order. `slice::sort_by` may panic on such comparators; this merge only
/// ever asks "is right strictly less than left" and always terminates.
fn merge_sort<T, F>(items: &mut [T], cmp: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }
    let mid = len / 2;
    merge_sort(&mut items[..mid], cmp);
    merge_sort(&mut items[mid..], cmp);

    let mut merged = Vec::with_capacity(len);
    let (mut i, mut j) = (0, mid);
    while i < mid && j < len {
        if cmp(&items[j], &items[i]) == Ordering::Less {
            merged.push(items[j]);
            j += 1;
        } else {
            merged.push(items[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&items[i..mid]);
    merged.extend_from_slice(&items[j..]);
    items.copy_from_slice(&merged);
}

/// Text comparison in the manner of a default collator.
///
/// Three levels, each consulted only when the previous one ties:
/// 1. Base letters, ignoring accents and case ("Émile" < "Zoe").
/// 2. Accents, unaccented first ("Emile" < "Émile").
/// 3. Case, lower case first ("amy" < "Amy" < "bob").
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let primary = base_letters(a).cmp(base_letters(b));
    if primary != Ordering::Equal {
        return primary;
    }

    let secondary = a
        .nfd()
        .flat_map(char::to_lowercase)
        .cmp(b.nfd().flat_map(char::to_lowercase));
    if secondary != Ordering::Equal {
        return secondary;
    }

    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        return match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => ca.cmp(&cb),
        };
    }
    a.len().cmp(&b.len())
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Parse a record timestamp into an absolute instant.
///
/// Accepts RFC 3339 (`2024-05-01T12:00:00.000Z`), a naive ISO date-time (read as
/// UTC) and a bare ISO date (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn compare_timestamps(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        // Unparsable on either side: no opinion
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::record;

    fn names(items: &[&ClientRecord]) -> Vec<String> {
        items.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("amy", "Bob"), Ordering::Less);
        assert_eq!(locale_cmp("Bob", "amy"), Ordering::Greater);
        assert_eq!(locale_cmp("Zed", "zed"), Ordering::Greater);
        assert_eq!(locale_cmp("zed", "Zed"), Ordering::Less);
        assert_eq!(locale_cmp("Amy", "Amy"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_prefix_sorts_first() {
        assert_eq!(locale_cmp("John", "Johnson"), Ordering::Less);
        assert_eq!(locale_cmp("John Doe", "Johnson"), Ordering::Less);
    }

    #[test]
    fn locale_cmp_folds_accents() {
        assert_eq!(locale_cmp("Émile", "Zoe"), Ordering::Less);
        assert_eq!(locale_cmp("Zoë", "Zoe"), Ordering::Greater);
        assert_eq!(locale_cmp("Emile", "Émile"), Ordering::Less);
        assert_eq!(locale_cmp("émile", "Émile"), Ordering::Less);
        assert_eq!(locale_cmp("Ångström", "Angstrom"), Ordering::Greater);
        assert_eq!(locale_cmp("Ångström", "Anna"), Ordering::Less);
    }

    #[test]
    fn accented_names_sort_among_their_base_letter() {
        let zoe = record(1, "Zoe");
        let emile = record(2, "Émile");
        let adam = record(3, "Adam");
        let mut items = vec![&zoe, &emile, &adam];

        sort_by_criteria(&mut items, &[SortCriterion::new(SortField::Name)]);

        assert_eq!(names(&items), vec!["Adam", "Émile", "Zoe"]);
    }

    #[test]
    fn parse_timestamp_formats() {
        let iso = parse_timestamp("2024-05-01T12:00:00.000Z").unwrap();
        let naive = parse_timestamp("2024-05-01T12:00:00").unwrap();
        assert_eq!(iso, naive);

        let offset = parse_timestamp("2024-05-01T14:00:00+02:00").unwrap();
        assert_eq!(iso, offset);

        let date = parse_timestamp("2024-05-01").unwrap();
        assert!(date < iso);

        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn compare_field_by_id_is_numeric() {
        let a = record(2, "A");
        let b = record(10, "B");
        assert_eq!(compare_field(&a, &b, SortField::Id), Ordering::Less);
    }

    #[test]
    fn compare_timestamps_ascending_is_oldest_first() {
        let mut old = record(1, "Old");
        old.created_at = "2023-01-01T00:00:00.000Z".into();
        let mut new = record(2, "New");
        new.created_at = "2024-01-01T00:00:00.000Z".into();

        assert_eq!(compare_field(&old, &new, SortField::CreatedAt), Ordering::Less);
    }

    #[test]
    fn malformed_timestamp_is_a_tie() {
        let mut bad = record(1, "Bad");
        bad.updated_at = "not a date".into();
        let good = record(2, "Good");

        assert_eq!(compare_field(&bad, &good, SortField::UpdatedAt), Ordering::Equal);
        assert_eq!(compare_field(&good, &bad, SortField::UpdatedAt), Ordering::Equal);
    }

    #[test]
    fn malformed_timestamp_falls_through_to_next_criterion() {
        let mut bad = record(2, "Bad");
        bad.created_at = "garbage".into();
        let good = record(1, "Good");
        let criteria = [
            SortCriterion::new(SortField::CreatedAt),
            SortCriterion::new(SortField::Id),
        ];

        assert_eq!(compare_records(&bad, &good, &criteria), Ordering::Greater);
    }

    #[test]
    fn descending_reverses() {
        let a = record(1, "Amy");
        let b = record(2, "Bob");
        let criteria =
            [SortCriterion::new(SortField::Name).with_direction(SortDirection::Descending)];
        assert_eq!(compare_records(&a, &b, &criteria), Ordering::Greater);
    }

    #[test]
    fn all_ties_are_equal() {
        let a = record(1, "Amy");
        let b = record(1, "Amy");
        let criteria = [
            SortCriterion::new(SortField::Name),
            SortCriterion::new(SortField::Id),
        ];
        assert_eq!(compare_records(&a, &b, &criteria), Ordering::Equal);
        assert_eq!(compare_records(&a, &b, &[]), Ordering::Equal);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let first = record(3, "Amy");
        let second = record(1, "Amy");
        let third = record(2, "Abe");
        let mut items = vec![&first, &second, &third];

        sort_by_criteria(&mut items, &[SortCriterion::new(SortField::Name)]);

        assert_eq!(names(&items), vec!["Abe", "Amy", "Amy"]);
        assert_eq!(items[1].id, 3);
        assert_eq!(items[2].id, 1);
    }

    #[test]
    fn merge_sort_orders_and_keeps_ties_stable() {
        let mut pairs = [(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')];
        merge_sort(&mut pairs, &mut |x: &(i32, char), y: &(i32, char)| x.0.cmp(&y.0));
        assert_eq!(pairs, [(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c')]);
    }

    #[test]
    fn sort_survives_malformed_timestamps() {
        let mut bad = record(4, "Bad");
        bad.created_at = "n/a".into();
        let mut a = record(1, "A");
        a.created_at = "2024-03-01T00:00:00Z".into();
        let mut b = record(2, "B");
        b.created_at = "2022-03-01T00:00:00Z".into();
        let mut items = vec![&a, &bad, &b];

        sort_by_criteria(&mut items, &[SortCriterion::new(SortField::CreatedAt)]);

        let mut ids: Vec<u64> = items.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[test]
    fn sort_with_no_criteria_keeps_order() {
        let a = record(2, "Bob");
        let b = record(1, "Amy");
        let mut items = vec![&a, &b];
        sort_by_criteria(&mut items, &[]);
        assert_eq!(names(&items), vec!["Bob", "Amy"]);
    }
}
