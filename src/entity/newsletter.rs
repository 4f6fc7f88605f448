use chrono::{DateTime, Utc};
use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::entity::{
    Entity, Status, format_status, format_timestamp, lenient_timestamp, status_field,
};
use crate::listing::criteria::{FilterField, FilterKind};
use crate::listing::field::FieldValue;
use crate::listing::page::PaginationStrategy;
use crate::ui::ColumnDef;

/// An e-mail address subscribed to the newsletter. Fetched whole, like FAQs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Entity for NewsletterSubscriber {
    const RESOURCE: &'static str = "newsletter";
    const TITLE: &'static str = "Newsletter";
    const NOUN: &'static str = "subscriber";
    const STRATEGY: PaginationStrategy = PaginationStrategy::FetchAllLocal;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn status(&self) -> Option<Status> {
        self.status
    }

    fn label(&self) -> String {
        self.email.clone().unwrap_or_else(|| self.id.clone())
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::sortable("email", "Email", Constraint::Min(30)),
            ColumnDef::sortable("status", "Status", Constraint::Length(9)),
            ColumnDef::sortable("createdAt", "Subscribed", Constraint::Length(17)),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.email.clone().unwrap_or_default(),
            format_status(self.status),
            format_timestamp(self.created_at),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "email" => FieldValue::opt_text(self.email.as_deref()),
            "status" => status_field(self.status),
            "createdAt" | "fromDate" | "toDate" => FieldValue::opt_timestamp(self.created_at),
            _ => FieldValue::Missing,
        }
    }

    fn filter_fields() -> &'static [FilterField] {
        static FIELDS: &[FilterField] = &[
            FilterField::text("email", "Email"),
            FilterField::status("status"),
            FilterField::new("fromDate", "Subscribed from", FilterKind::DateFrom),
            FilterField::new("toDate", "Subscribed to", FilterKind::DateTo),
        ];
        FIELDS
    }
}
