use chrono::{DateTime, Utc};
use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::entity::{
    EditableField, Entity, Status, format_amount, format_status, format_timestamp,
    lenient_number, lenient_timestamp, status_field,
};
use crate::listing::criteria::FilterField;
use crate::listing::field::FieldValue;
use crate::listing::page::PaginationStrategy;
use crate::ui::ColumnDef;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "courseName", alias = "title")]
    pub name: Option<String>,
    #[serde(default, alias = "courseCode")]
    pub code: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, alias = "price", deserialize_with = "lenient_number")]
    pub fee: Option<f64>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Entity for Course {
    const RESOURCE: &'static str = "course";
    const TITLE: &'static str = "Courses";
    const NOUN: &'static str = "course";
    const STRATEGY: PaginationStrategy = PaginationStrategy::Server;

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
        self.name.clone().unwrap_or_else(|| self.id.clone())
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::sortable("name", "Course", Constraint::Min(20)),
            ColumnDef::sortable("code", "Code", Constraint::Length(10)),
            ColumnDef::new("Duration", Constraint::Length(12)),
            ColumnDef::sortable("fee", "Fee", Constraint::Length(10)),
            ColumnDef::sortable("status", "Status", Constraint::Length(9)),
            ColumnDef::sortable("createdAt", "Created", Constraint::Length(17)),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone().unwrap_or_default(),
            self.code.clone().unwrap_or_default(),
            self.duration.clone().unwrap_or_default(),
            format_amount(self.fee),
            format_status(self.status),
            format_timestamp(self.created_at),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "name" | "search" => FieldValue::opt_text(self.name.as_deref()),
            "code" => FieldValue::opt_text(self.code.as_deref()),
            "fee" => self.fee.map_or(FieldValue::Missing, FieldValue::Number),
            "status" => status_field(self.status),
            "createdAt" => FieldValue::opt_timestamp(self.created_at),
            _ => FieldValue::Missing,
        }
    }

    fn filter_fields() -> &'static [FilterField] {
        static FIELDS: &[FilterField] = &[
            FilterField::text("search", "Course name"),
            FilterField::status("status"),
        ];
        FIELDS
    }

    fn editable_field() -> Option<EditableField> {
        Some(EditableField {
            key: "name",
            label: "Course name",
        })
    }
}
