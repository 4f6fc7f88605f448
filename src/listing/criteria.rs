//! Filter criteria, the filter fields an entity page offers, and validation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::listing::field::FieldValue;
use crate::search::Matcher;

/// Date format accepted by date filter inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A selectable option of a choice filter: wire value and display label.
pub type Choice = (&'static str, &'static str);

/// Options of the binary active/inactive status filter.
pub const STATUS_CHOICES: &[Choice] = &[("Y", "Active"), ("N", "Inactive")];

/// Bad filter input. Blocks the fetch before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { field: &'static str, value: String },
    #[error("{field} cannot be in the future")]
    FutureDate { field: &'static str },
    #[error("{from} cannot be later than {to}")]
    InvertedRange {
        from: &'static str,
        to: &'static str,
    },
    #[error("{0} is not an allowed page size")]
    InvalidPageSize(usize),
}

/// Kind of input behind a filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Free text, sent as-is.
    Text,
    /// Free text naming a related entity. Resolved into identifiers through a
    /// secondary search on `resource` and sent as a comma separated `param`.
    Lookup {
        resource: &'static str,
        param: &'static str,
    },
    /// One of a fixed set of values.
    Choice(&'static [Choice]),
    /// A single calendar date.
    Date,
    /// Lower bound of a date range. Must not be in the future.
    DateFrom,
    /// Upper bound of a date range.
    DateTo,
}

impl FilterKind {
    pub const fn is_date(&self) -> bool {
        matches!(self, Self::Date | Self::DateFrom | Self::DateTo)
    }
}

/// A filter input offered by an entity page.
///
/// `key` doubles as the query parameter name sent to the backend and as the
/// entity field consulted when filtering locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FilterKind,
}

impl FilterField {
    pub const fn new(key: &'static str, label: &'static str, kind: FilterKind) -> Self {
        Self { key, label, kind }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, FilterKind::Text)
    }

    pub const fn status(key: &'static str) -> Self {
        Self::new(key, "Status", FilterKind::Choice(STATUS_CHOICES))
    }
}

/// Current filter values keyed by field name.
///
/// Absent and blank values mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    values: BTreeMap<String, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(key);
        } else {
            self.values.insert(key.to_string(), value);
        }
    }

    /// The trimmed value for `key`, or `None` when unconstrained.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.trim().is_empty())
    }

    /// All constrained fields, in key order.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.trim()))
            .filter(|(_, v)| !v.is_empty())
    }

    /// Parse the date stored under `field`, if any.
    pub fn date(&self, field: &FilterField) -> Result<Option<NaiveDate>, ValidationError> {
        self.get(field.key)
            .map(|raw| {
                NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
                    ValidationError::InvalidDate {
                        field: field.label,
                        value: raw.to_string(),
                    }
                })
            })
            .transpose()
    }

    /// Check the criteria against the page's filter fields.
    ///
    /// Every date must parse, a range's lower bound must not be after
    /// `today`, and it must not be after the upper bound.
    pub fn validate(&self, fields: &[FilterField], today: NaiveDate) -> Result<(), ValidationError> {
        let mut from: Option<(&FilterField, NaiveDate)> = None;
        let mut to: Option<(&FilterField, NaiveDate)> = None;

        for field in fields.iter().filter(|f| f.kind.is_date()) {
            let Some(date) = self.date(field)? else {
                continue;
            };
            match field.kind {
                FilterKind::DateFrom => {
                    if date > today {
                        return Err(ValidationError::FutureDate { field: field.label });
                    }
                    from = Some((field, date));
                }
                FilterKind::DateTo => to = Some((field, date)),
                _ => {}
            }
        }

        if let (Some((from_field, from_date)), Some((to_field, to_date))) = (from, to) {
            if from_date > to_date {
                return Err(ValidationError::InvertedRange {
                    from: from_field.label,
                    to: to_field.label,
                });
            }
        }
        Ok(())
    }

    /// In-memory filtering used by locally paginated entities.
    ///
    /// `value_of` reads an entity field by filter key. Text fields match
    /// fuzzily, choices match exactly, dates compare by calendar day.
    pub fn matches(
        &self,
        fields: &[FilterField],
        matcher: &Matcher,
        value_of: impl Fn(&str) -> FieldValue,
    ) -> bool {
        fields.iter().all(|field| {
            let Some(wanted) = self.get(field.key) else {
                return true;
            };
            let actual = value_of(field.key);
            match field.kind {
                FilterKind::Text | FilterKind::Lookup { .. } => actual
                    .as_search_text()
                    .is_some_and(|text| matcher.matches(&text, wanted)),
                FilterKind::Choice(_) => actual
                    .as_search_text()
                    .is_some_and(|text| text.eq_ignore_ascii_case(wanted)),
                FilterKind::Date | FilterKind::DateFrom | FilterKind::DateTo => {
                    let Ok(wanted) = NaiveDate::parse_from_str(wanted, DATE_FORMAT) else {
                        return false;
                    };
                    let Some(actual) = actual.as_date() else {
                        return false;
                    };
                    match field.kind {
                        FilterKind::DateFrom => actual >= wanted,
                        FilterKind::DateTo => actual <= wanted,
                        _ => actual == wanted,
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FilterField] = &[
        FilterField::text("name", "Name"),
        FilterField::status("status"),
        FilterField::new("fromDate", "From date", FilterKind::DateFrom),
        FilterField::new("toDate", "To date", FilterKind::DateTo),
    ];

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_blank_values_are_unconstrained() {
        let mut criteria = FilterCriteria::new().with("name", "   ");
        assert!(criteria.is_empty());
        assert_eq!(criteria.get("name"), None);

        criteria.set("name", "ada");
        criteria.set("name", "");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_future_from_date_fails() {
        let criteria = FilterCriteria::new().with("fromDate", "2026-10-17");
        assert_eq!(
            criteria.validate(FIELDS, today()),
            Err(ValidationError::FutureDate { field: "From date" })
        );
    }

    #[test]
    fn test_from_date_today_is_allowed() {
        let criteria = FilterCriteria::new().with("fromDate", "2026-10-16");
        assert!(criteria.validate(FIELDS, today()).is_ok());
    }

    #[test]
    fn test_inverted_range_fails() {
        let criteria = FilterCriteria::new()
            .with("fromDate", "2026-10-01")
            .with("toDate", "2026-09-01");
        assert!(matches!(
            criteria.validate(FIELDS, today()),
            Err(ValidationError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_unparseable_date_fails() {
        let criteria = FilterCriteria::new().with("toDate", "yesterday");
        assert!(matches!(
            criteria.validate(FIELDS, today()),
            Err(ValidationError::InvalidDate { field: "To date", .. })
        ));
    }

    #[test]
    fn test_local_matching() {
        let matcher = Matcher::new();
        let criteria = FilterCriteria::new()
            .with("name", "ada")
            .with("status", "y")
            .with("fromDate", "2026-01-01");
        let value_of = |key: &str| match key {
            "name" => FieldValue::text("Ada Lovelace"),
            "status" => FieldValue::text("Y"),
            "fromDate" => FieldValue::Date(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()),
            _ => FieldValue::Missing,
        };
        assert!(criteria.matches(FIELDS, &matcher, value_of));

        let criteria = criteria.with("status", "N");
        assert!(!criteria.matches(FIELDS, &matcher, value_of));
    }

    #[test]
    fn test_missing_field_never_matches_a_constraint() {
        let matcher = Matcher::new();
        let criteria = FilterCriteria::new().with("name", "ada");
        assert!(!criteria.matches(FIELDS, &matcher, |_| FieldValue::Missing));
    }
}
