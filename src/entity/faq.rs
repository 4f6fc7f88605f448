use chrono::{DateTime, Utc};
use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::entity::{
    EditableField, Entity, Status, format_status, format_timestamp, lenient_timestamp,
    status_field,
};
use crate::listing::criteria::{FilterField, FilterKind};
use crate::listing::field::FieldValue;
use crate::listing::page::PaginationStrategy;
use crate::ui::ColumnDef;

/// A question/answer pair shown on the public site.
///
/// The FAQ list is small and its endpoint has no server-side search, so it is
/// fetched whole and filtered in memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Entity for Faq {
    const RESOURCE: &'static str = "faq";
    const TITLE: &'static str = "FAQs";
    const NOUN: &'static str = "FAQ";
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
        self.question.clone().unwrap_or_else(|| self.id.clone())
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::sortable("question", "Question", Constraint::Min(30)),
            ColumnDef::new("Answer", Constraint::Min(30)),
            ColumnDef::sortable("status", "Status", Constraint::Length(9)),
            ColumnDef::sortable("createdAt", "Created", Constraint::Length(17)),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.question.clone().unwrap_or_default(),
            self.answer.clone().unwrap_or_default(),
            format_status(self.status),
            format_timestamp(self.created_at),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "question" => FieldValue::opt_text(self.question.as_deref()),
            "status" => status_field(self.status),
            "createdAt" | "fromDate" | "toDate" => FieldValue::opt_timestamp(self.created_at),
            _ => FieldValue::Missing,
        }
    }

    fn filter_fields() -> &'static [FilterField] {
        static FIELDS: &[FilterField] = &[
            FilterField::text("question", "Question"),
            FilterField::status("status"),
            FilterField::new("fromDate", "Created from", FilterKind::DateFrom),
            FilterField::new("toDate", "Created to", FilterKind::DateTo),
        ];
        FIELDS
    }

    fn editable_field() -> Option<EditableField> {
        Some(EditableField {
            key: "question",
            label: "Question",
        })
    }
}
