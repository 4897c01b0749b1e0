//! Property-based tests for pagination, natural ordering, sorting and date
//! truncation.

#[cfg(test)]
mod proptest_tests {
    use std::cmp::Ordering;

    use proptest::prelude::*;

    use crate::natural::{compare, compare_optional};
    use crate::pagination::{Page, PageInfo, Paginator};
    use crate::phases::aggregate::{self, SortColumn, SortOrder};
    use crate::roster::{calendar_date, format_date, Role, Roster};
    use crate::testing::record;

    fn paginate(pages: &[Vec<u32>]) -> (Vec<u32>, usize) {
        let mut fetches = 0;
        let mut paginator = Paginator::new(|cursor: Option<&str>| {
            fetches += 1;
            let index: usize = cursor.map_or(0, |c| c.parse().unwrap());
            let items = pages.get(index).cloned().unwrap_or_default();
            let page_info = if index + 1 < pages.len() {
                PageInfo::next((index + 1).to_string())
            } else {
                PageInfo::last()
            };
            Ok(Page::new(items, page_info))
        });
        let items = paginator.by_ref().collect::<crate::error::Result<Vec<_>>>().unwrap();
        drop(paginator);
        (items, fetches)
    }

    // ============================================================================
    // Paginator properties
    // ============================================================================

    proptest! {
        /// Property: the items are exactly the concatenation of the pages
        #[test]
        fn pagination_concatenates_pages(
            pages in prop::collection::vec(prop::collection::vec(any::<u32>(), 0..5), 1..8)
        ) {
            let (items, fetches) = paginate(&pages);
            let expected: Vec<u32> = pages.iter().flatten().copied().collect();
            prop_assert_eq!(items, expected);
            prop_assert_eq!(fetches, pages.len());
        }
    }

    #[test]
    fn pagination_without_pages_is_empty() {
        let (items, fetches) = paginate(&[]);
        assert!(items.is_empty());
        assert_eq!(fetches, 1);
    }

    // ============================================================================
    // Natural ordering properties
    // ============================================================================

    proptest! {
        /// Property: compare is antisymmetric
        #[test]
        fn natural_compare_is_antisymmetric(a in "[a-zA-Z0-9 _-]{0,12}", b in "[a-zA-Z0-9 _-]{0,12}") {
            prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
        }

        /// Property: only identical strings compare equal
        #[test]
        fn natural_compare_equal_means_identical(a in "[a-zA-Z0-9]{0,12}", b in "[a-zA-Z0-9]{0,12}") {
            prop_assert_eq!(compare(&a, &b) == Ordering::Equal, a == b);
        }

        /// Property: compare is transitive
        #[test]
        fn natural_compare_is_transitive(
            a in "[a-c0-9]{0,6}",
            b in "[a-c0-9]{0,6}",
            c in "[a-c0-9]{0,6}",
        ) {
            if compare(&a, &b) != Ordering::Greater && compare(&b, &c) != Ordering::Greater {
                prop_assert_ne!(compare(&a, &c), Ordering::Greater);
            }
        }

        /// Property: numbers embedded at the same position order by value
        #[test]
        fn natural_compare_orders_numbers_by_value(x in 0u32..100_000, y in 0u32..100_000) {
            let a = format!("user{}", x);
            let b = format!("user{}", y);
            prop_assert_eq!(compare(&a, &b), x.cmp(&y));
        }

        /// Property: absent values sort after every present value
        #[test]
        fn absent_values_sort_last(a in ".{0,8}") {
            prop_assert_eq!(compare_optional(Some(a.as_str()), None), Ordering::Less);
            prop_assert_eq!(compare_optional(None, Some(a.as_str())), Ordering::Greater);
        }
    }

    // ============================================================================
    // Sorting properties
    // ============================================================================

    proptest! {
        /// Property: descending is the reverse of ascending for distinct keys
        #[test]
        fn descending_reverses_ascending(
            logins in prop::collection::hash_set("[a-z]{1,4}[0-9]{0,3}", 0..12)
        ) {
            let mut roster = Roster::new("eng");
            roster.extend(logins.iter().map(|login| record(login, Role::Member)));

            let asc = aggregate::execute(roster.clone(), SortColumn::Login, SortOrder::Ascending);
            let desc = aggregate::execute(roster, SortColumn::Login, SortOrder::Descending);

            let mut reversed: Vec<&str> = desc.iter().map(|r| r.login.as_str()).collect();
            reversed.reverse();
            let ascending: Vec<&str> = asc.iter().map(|r| r.login.as_str()).collect();
            prop_assert_eq!(ascending, reversed);
        }

        /// Property: sorting keeps every record
        #[test]
        fn sorting_is_a_permutation(logins in prop::collection::vec("[a-z0-9]{1,5}", 0..12)) {
            let mut roster = Roster::new("eng");
            roster.extend(logins.iter().map(|login| record(login, Role::Member)));

            let sorted = aggregate::execute(roster, SortColumn::Login, SortOrder::Ascending);
            let mut expected = logins.clone();
            expected.sort();
            let mut actual: Vec<String> = sorted.iter().map(|r| r.login.clone()).collect();
            actual.sort();
            prop_assert_eq!(actual, expected);
        }
    }

    // ============================================================================
    // Date truncation properties
    // ============================================================================

    proptest! {
        /// Property: any valid timestamp truncates to a 10-character date
        #[test]
        fn dates_render_as_ten_characters(
            year in 1970i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            time in "T[0-2][0-9]:[0-5][0-9]:[0-5][0-9](Z|[+-][01][0-9]:00)",
        ) {
            let timestamp = format!("{:04}-{:02}-{:02}{}", year, month, day, time);
            let date = calendar_date(&timestamp).unwrap();
            let rendered = format_date(date);
            prop_assert_eq!(rendered.len(), 10);
            prop_assert_eq!(&rendered, &timestamp[..10]);
        }

        /// Property: truncation never panics on arbitrary input
        #[test]
        fn calendar_date_never_panics(input in ".*") {
            let _ = calendar_date(&input);
        }
    }
}
