//! Column sorting of the materialised page.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::listing::field::FieldValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Column and direction of an explicit sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const fn ascending(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Ascending,
        }
    }

    /// The spec after a click on `field`'s header.
    ///
    /// Clicking the active column flips its direction; clicking another
    /// column starts ascending on that column.
    #[must_use]
    pub fn clicked(current: Option<Self>, field: &'static str) -> Self {
        match current {
            Some(spec) if spec.field == field => Self {
                field,
                direction: spec.direction.flipped(),
            },
            _ => Self::ascending(field),
        }
    }
}

/// Sort `items` by `spec`, reading each field with `value_of`. Stable.
pub fn sort_by_spec<E>(items: &mut [E], spec: SortSpec, value_of: impl Fn(&E, &str) -> FieldValue) {
    items.sort_by(|a, b| {
        let ord = value_of(a, spec.field).compare(&value_of(b, spec.field));
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

/// Newest first by creation time. Records without a timestamp count as the
/// epoch and therefore end up last.
pub fn sort_newest_first<E>(items: &mut [E], created_at: impl Fn(&E) -> Option<DateTime<Utc>>) {
    let epoch = DateTime::<Utc>::UNIX_EPOCH;
    items.sort_by(|a, b| -> Ordering {
        let a = created_at(a).unwrap_or(epoch);
        let b = created_at(b).unwrap_or(epoch);
        b.cmp(&a)
    });
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_same_column_alternates_indefinitely() {
        let mut spec = SortSpec::clicked(None, "name");
        assert_eq!(spec.direction, SortDirection::Ascending);

        let mut directions = Vec::new();
        for _ in 0..5 {
            spec = SortSpec::clicked(Some(spec), "name");
            directions.push(spec.direction);
        }
        assert_eq!(
            directions,
            vec![
                SortDirection::Descending,
                SortDirection::Ascending,
                SortDirection::Descending,
                SortDirection::Ascending,
                SortDirection::Descending,
            ]
        );
    }

    #[test]
    fn test_other_column_resets_to_ascending() {
        let spec = SortSpec {
            field: "name",
            direction: SortDirection::Descending,
        };
        let next = SortSpec::clicked(Some(spec), "email");
        assert_eq!(next, SortSpec::ascending("email"));
    }

    #[test]
    fn test_sort_by_spec_descending() {
        let mut items = vec!["b", "c", "a"];
        sort_by_spec(
            &mut items,
            SortSpec {
                field: "v",
                direction: SortDirection::Descending,
            },
            |item, _| FieldValue::text(*item),
        );
        assert_eq!(items, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_newest_first_puts_missing_timestamps_last() {
        let t = |d| Utc.with_ymd_and_hms(2026, 1, d, 0, 0, 0).single();
        let mut items = vec![(1, t(1)), (2, None), (3, t(3)), (4, t(2))];
        sort_newest_first(&mut items, |(_, ts)| *ts);
        let order: Vec<i32> = items.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![3, 4, 1, 2]);
    }
}
