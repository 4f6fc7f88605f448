use chrono::{DateTime, Utc};
use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::entity::{
    EditableField, Entity, Status, format_status, format_timestamp, lenient_timestamp,
    status_field,
};
use crate::listing::criteria::{Choice, FilterField, FilterKind};
use crate::listing::field::FieldValue;
use crate::listing::page::PaginationStrategy;
use crate::ui::ColumnDef;

const ROLE_CHOICES: &[Choice] = &[
    ("student", "Student"),
    ("teacher", "Teacher"),
    ("admin", "Admin"),
];

/// A platform account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "mobile")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Entity for User {
    const RESOURCE: &'static str = "user";
    const TITLE: &'static str = "Users";
    const NOUN: &'static str = "user";
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
        self.name
            .clone()
            .or_else(|| self.email.clone())
            .unwrap_or_else(|| self.id.clone())
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::sortable("name", "Name", Constraint::Min(18)),
            ColumnDef::sortable("email", "Email", Constraint::Min(24)),
            ColumnDef::new("Phone", Constraint::Length(14)),
            ColumnDef::sortable("role", "Role", Constraint::Length(10)),
            ColumnDef::sortable("status", "Status", Constraint::Length(9)),
            ColumnDef::sortable("createdAt", "Created", Constraint::Length(17)),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone().unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.phone.clone().unwrap_or_default(),
            self.role.clone().unwrap_or_default(),
            format_status(self.status),
            format_timestamp(self.created_at),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "name" | "search" => FieldValue::opt_text(self.name.as_deref()),
            "email" => FieldValue::opt_text(self.email.as_deref()),
            "role" => FieldValue::opt_text(self.role.as_deref()),
            "status" => status_field(self.status),
            "createdAt" => FieldValue::opt_timestamp(self.created_at),
            _ => FieldValue::Missing,
        }
    }

    fn filter_fields() -> &'static [FilterField] {
        static FIELDS: &[FilterField] = &[
            FilterField::text("search", "Name or email"),
            FilterField::new("role", "Role", FilterKind::Choice(ROLE_CHOICES)),
            FilterField::status("status"),
        ];
        FIELDS
    }

    fn editable_field() -> Option<EditableField> {
        Some(EditableField {
            key: "name",
            label: "Name",
        })
    }
}
