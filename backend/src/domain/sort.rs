//! Display ordering for the user list.
//!
//! Sorting never touches the stored order; [`sorted_view`] always works on a
//! copy.

use std::cmp::Ordering;

use super::user::UserRecord;

/// Ordering selected by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Stored order, as loaded or inserted.
    #[default]
    Unsorted,
    /// By name, A to Z.
    AlphabeticalAsc,
    /// By name, Z to A.
    AlphabeticalDesc,
}

impl SortKey {
    /// Every key in the order the selector offers them.
    pub const ALL: [Self; 3] = [Self::Unsorted, Self::AlphabeticalAsc, Self::AlphabeticalDesc];

    /// Map a query value onto a key; unknown values fall back to
    /// [`SortKey::Unsorted`].
    ///
    /// # Examples
    /// ```
    /// use roster::domain::SortKey;
    ///
    /// assert_eq!(SortKey::parse("alphabetical-desc"), SortKey::AlphabeticalDesc);
    /// assert_eq!(SortKey::parse("by-age"), SortKey::Unsorted);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "alphabetical-asc" => Self::AlphabeticalAsc,
            "alphabetical-desc" => Self::AlphabeticalDesc,
            _ => Self::Unsorted,
        }
    }

    /// Query value for this key; empty for the stored order.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unsorted => "",
            Self::AlphabeticalAsc => "alphabetical-asc",
            Self::AlphabeticalDesc => "alphabetical-desc",
        }
    }
}

/// Case-insensitive comparison with a case-sensitive tie-break, so that
/// "ann" and "Bob" order the way a reader expects.
fn compare_names(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

/// Return `records` ordered by `key`.
///
/// The sort is stable; [`SortKey::Unsorted`] returns the input order.
///
/// # Examples
/// ```
/// use roster::domain::{SortKey, sorted_view};
///
/// let view = sorted_view(&[], SortKey::AlphabeticalAsc);
/// assert!(view.is_empty());
/// ```
#[must_use]
pub fn sorted_view(records: &[UserRecord], key: SortKey) -> Vec<UserRecord> {
    let mut view = records.to_vec();
    match key {
        SortKey::AlphabeticalAsc => view.sort_by(|a, b| compare_names(a.name(), b.name())),
        SortKey::AlphabeticalDesc => view.sort_by(|a, b| compare_names(b.name(), a.name())),
        SortKey::Unsorted => {}
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::record_named;
    use rstest::rstest;

    fn names(records: &[UserRecord]) -> Vec<&str> {
        records.iter().map(UserRecord::name).collect()
    }

    #[rstest]
    fn ascending_orders_by_name() {
        let records = vec![record_named(1, "Bob"), record_named(2, "Ann")];
        let view = sorted_view(&records, SortKey::AlphabeticalAsc);
        assert_eq!(names(&view), ["Ann", "Bob"]);
        assert_eq!(names(&records), ["Bob", "Ann"], "input must stay untouched");
    }

    #[rstest]
    fn descending_is_exact_reverse_of_ascending() {
        let records = vec![
            record_named(1, "Mila"),
            record_named(2, "anton"),
            record_named(3, "Zoe"),
            record_named(4, "Борис"),
            record_named(5, "Bob"),
        ];
        let mut ascending = sorted_view(&records, SortKey::AlphabeticalAsc);
        let descending = sorted_view(&records, SortKey::AlphabeticalDesc);
        ascending.reverse();
        assert_eq!(ascending, descending);
    }

    #[rstest]
    fn comparison_ignores_case() {
        let records = vec![record_named(1, "bob"), record_named(2, "Ann")];
        let view = sorted_view(&records, SortKey::AlphabeticalAsc);
        assert_eq!(names(&view), ["Ann", "bob"]);
    }

    #[rstest]
    fn unsorted_keeps_stored_order() {
        let records = vec![record_named(3, "Cid"), record_named(1, "Ann")];
        let view = sorted_view(&records, SortKey::Unsorted);
        assert_eq!(view, records);
    }

    #[rstest]
    #[case("alphabetical-asc", SortKey::AlphabeticalAsc)]
    #[case("alphabetical-desc", SortKey::AlphabeticalDesc)]
    #[case("", SortKey::Unsorted)]
    #[case("newest", SortKey::Unsorted)]
    fn parse_maps_query_values(#[case] raw: &str, #[case] expected: SortKey) {
        assert_eq!(SortKey::parse(raw), expected);
        assert_eq!(SortKey::parse(expected.as_str()), expected);
    }
}
