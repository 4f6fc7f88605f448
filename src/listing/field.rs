//! Typed field values read off entities for sorting and local filtering.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

/// A single entity attribute, as seen by the list machinery.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Build from an optional string, treating blank strings as missing.
    pub fn opt_text(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self::Text(v.to_string()),
            _ => Self::Missing,
        }
    }

    pub fn opt_timestamp(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Missing, Self::Timestamp)
    }

    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Calendar date of this value, if it has one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            Self::Timestamp(ts) => Some(ts.date_naive()),
            _ => None,
        }
    }

    /// Text used for substring and fuzzy matching.
    pub fn as_search_text(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Text(s) => Some(s.clone()),
            Self::Number(n) => Some(n.to_string()),
            Self::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
            Self::Timestamp(ts) => Some(ts.format("%Y-%m-%d").to_string()),
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::Missing => 0,
            Self::Number(_) => 1,
            Self::Date(_) | Self::Timestamp(_) => 2,
            Self::Text(_) => 3,
        }
    }

    /// Total order used by column sorting.
    ///
    /// Missing values sort before everything else. Dates and timestamps
    /// compare chronologically with each other; text compares
    /// case-insensitively.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Number(a), Self::Number(b)) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (a, b) if a.rank() == 2 && b.rank() == 2 => a.as_date().cmp(&b.as_date()),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sorts_first() {
        let a = FieldValue::Missing;
        let b = FieldValue::text("alpha");
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn test_text_compares_case_insensitively() {
        assert_eq!(
            FieldValue::text("apple").compare(&FieldValue::text("Banana")),
            Ordering::Less
        );
    }

    #[test]
    fn test_blank_text_is_missing() {
        assert!(FieldValue::opt_text(Some("  ")).is_missing());
        assert!(FieldValue::opt_text(None).is_missing());
    }
}
