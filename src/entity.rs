//! Entity types administered by the console.
//!
//! Every entity page is the same generic list page, configured through the
//! [`Entity`] trait. The trait tells the list machinery how to reach the
//! backend resource, which filters exist, how to read fields for sorting and
//! local filtering, and how to render a table row.

mod attendance;
mod course;
mod faq;
mod fee_assignment;
mod newsletter;
mod user;

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub use attendance::Attendance;
pub use course::Course;
pub use faq::Faq;
pub use fee_assignment::FeeAssignment;
pub use newsletter::NewsletterSubscriber;
pub use user::User;

use crate::listing::criteria::FilterField;
use crate::listing::field::FieldValue;
use crate::listing::page::PaginationStrategy;
use crate::receipt::Receipt;
use crate::registry::PageRegistry;
use crate::ui::ColumnDef;

/// Binary active flag, serialised as `"Y"`/`"N"` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Y", alias = "y")]
    Active,
    #[serde(rename = "N", alias = "n")]
    Inactive,
}

impl Status {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }

    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Active => "Y",
            Self::Inactive => "N",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The single field a record can be created with or renamed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditableField {
    pub key: &'static str,
    pub label: &'static str,
}

/// A backend record shown on an entity page.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// REST resource key, e.g. `user` for `/user/getall`.
    const RESOURCE: &'static str;

    /// Page title, e.g. "Users".
    const TITLE: &'static str;

    /// Singular noun used in prompts, e.g. "user".
    const NOUN: &'static str;

    const STRATEGY: PaginationStrategy;

    fn id(&self) -> &str;

    fn created_at(&self) -> Option<DateTime<Utc>>;

    fn status(&self) -> Option<Status> {
        None
    }

    /// Short human label used in confirmation prompts.
    fn label(&self) -> String;

    fn columns() -> &'static [ColumnDef];

    /// Display text per column, in [`Entity::columns`] order.
    fn cells(&self) -> Vec<String>;

    /// Read a field by column or filter key.
    fn field(&self, key: &str) -> FieldValue;

    fn filter_fields() -> &'static [FilterField];

    fn editable_field() -> Option<EditableField> {
        None
    }

    fn receipt(&self) -> Option<Receipt> {
        None
    }
}

/// A related record that the backend sends either as a bare identifier or
/// populated with at least a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Related {
    Populated {
        #[serde(rename = "_id", alias = "id", default)]
        id: Option<String>,
        #[serde(default, alias = "fullName", alias = "courseName", alias = "title")]
        name: Option<String>,
    },
    Id(String),
}

impl Related {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Populated { name, .. } => name.as_deref(),
            Self::Id(_) => None,
        }
    }

    /// Name when populated, otherwise the identifier.
    pub fn display(&self) -> String {
        match self {
            Self::Populated { name: Some(name), .. } => name.clone(),
            Self::Populated { id: Some(id), .. } | Self::Id(id) => id.clone(),
            Self::Populated { .. } => "—".to_string(),
        }
    }
}

/// Lenient timestamp parsing: anything unparseable becomes `None`.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

/// Lenient calendar-date parsing accepting plain dates and full timestamps.
pub fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .ok()
            .or_else(|| parse_timestamp(s).map(|ts| ts.date_naive()))
    }))
}

/// Lenient numeric parsing accepting JSON numbers and numeric strings.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
}

pub fn format_timestamp(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(|| "—".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
}

pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "—".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

pub fn format_amount(amount: Option<f64>) -> String {
    amount.map_or_else(|| "—".to_string(), |a| format!("{a:.2}"))
}

pub fn format_status(status: Option<Status>) -> String {
    status.map_or_else(|| "—".to_string(), |s| s.label().to_string())
}

pub fn status_field(status: Option<Status>) -> FieldValue {
    status.map_or(FieldValue::Missing, |s| FieldValue::text(s.as_wire()))
}

/// Register a list page for every entity type.
pub fn register_all(registry: &mut PageRegistry) {
    registry.register_entity::<User>("users", "Accounts of students, staff and admins");
    registry.register_entity::<Course>("courses", "Course catalogue and fees");
    registry.register_entity::<Attendance>("attendance", "Daily attendance records");
    registry.register_entity::<FeeAssignment>("fees", "Fee assignments and receipts");
    registry.register_entity::<Faq>("faqs", "Frequently asked questions");
    registry.register_entity::<NewsletterSubscriber>("newsletters", "Newsletter subscribers");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "\"Y\"");
        let parsed: Status = serde_json::from_str("\"n\"").unwrap();
        assert_eq!(parsed, Status::Inactive);
        assert_eq!(Status::Active.toggled(), Status::Inactive);
        assert_eq!(Status::Inactive.toggled(), Status::Active);
    }

    #[test]
    fn test_related_accepts_both_shapes() {
        let populated: Related =
            serde_json::from_str(r#"{"_id":"s1","name":"Ada Lovelace"}"#).unwrap();
        assert_eq!(populated.display(), "Ada Lovelace");

        let bare: Related = serde_json::from_str(r#""s1""#).unwrap();
        assert_eq!(bare.display(), "s1");
        assert_eq!(bare.name(), None);
    }
}
