use chrono::{DateTime, NaiveDate, Utc};
use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::entity::{
    Entity, Related, Status, format_amount, format_date, format_status, lenient_date,
    lenient_number, lenient_timestamp, status_field,
};
use crate::listing::criteria::{Choice, FilterField, FilterKind};
use crate::listing::field::FieldValue;
use crate::listing::page::PaginationStrategy;
use crate::receipt::Receipt;
use crate::ui::ColumnDef;

const PAYMENT_CHOICES: &[Choice] = &[
    ("Paid", "Paid"),
    ("Partial", "Partial"),
    ("Pending", "Pending"),
];

/// A fee charged to a student for a course.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAssignment {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "receiptNumber")]
    pub receipt_no: Option<String>,
    #[serde(default, alias = "studentId")]
    pub student: Option<Related>,
    #[serde(default, alias = "courseId")]
    pub course: Option<Related>,
    #[serde(default, alias = "totalFee", alias = "amount", deserialize_with = "lenient_number")]
    pub total_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub paid_amount: Option<f64>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FeeAssignment {
    fn student_name(&self) -> String {
        self.student.as_ref().map_or_else(String::new, Related::display)
    }

    fn course_name(&self) -> String {
        self.course.as_ref().map_or_else(String::new, Related::display)
    }

    /// Outstanding amount, never negative.
    pub fn balance(&self) -> Option<f64> {
        self.total_amount
            .map(|total| (total - self.paid_amount.unwrap_or(0.0)).max(0.0))
    }
}

impl Entity for FeeAssignment {
    const RESOURCE: &'static str = "feeassignment";
    const TITLE: &'static str = "Fee Assignments";
    const NOUN: &'static str = "fee assignment";
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
        format!("{} / {}", self.student_name(), self.course_name())
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::sortable("receiptNo", "Receipt", Constraint::Length(12)),
            ColumnDef::sortable("studentName", "Student", Constraint::Min(16)),
            ColumnDef::sortable("courseName", "Course", Constraint::Min(16)),
            ColumnDef::sortable("totalAmount", "Total", Constraint::Length(10)),
            ColumnDef::sortable("paidAmount", "Paid", Constraint::Length(10)),
            ColumnDef::sortable("dueDate", "Due", Constraint::Length(10)),
            ColumnDef::sortable("paymentStatus", "Payment", Constraint::Length(8)),
            ColumnDef::sortable("status", "Status", Constraint::Length(9)),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.receipt_no.clone().unwrap_or_default(),
            self.student_name(),
            self.course_name(),
            format_amount(self.total_amount),
            format_amount(self.paid_amount),
            format_date(self.due_date),
            self.payment_status.clone().unwrap_or_default(),
            format_status(self.status),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        let number = |n: Option<f64>| n.map_or(FieldValue::Missing, FieldValue::Number);
        match key {
            "receiptNo" => FieldValue::opt_text(self.receipt_no.as_deref()),
            "studentName" => {
                FieldValue::opt_text(self.student.as_ref().and_then(Related::name))
            }
            "courseName" => FieldValue::opt_text(self.course.as_ref().and_then(Related::name)),
            "totalAmount" => number(self.total_amount),
            "paidAmount" => number(self.paid_amount),
            "dueDate" => self.due_date.map_or(FieldValue::Missing, FieldValue::Date),
            "paymentStatus" => FieldValue::opt_text(self.payment_status.as_deref()),
            "status" => status_field(self.status),
            "createdAt" | "fromDate" | "toDate" => FieldValue::opt_timestamp(self.created_at),
            _ => FieldValue::Missing,
        }
    }

    fn filter_fields() -> &'static [FilterField] {
        static FIELDS: &[FilterField] = &[
            FilterField::new(
                "studentName",
                "Student name",
                FilterKind::Lookup {
                    resource: "student",
                    param: "studentIds",
                },
            ),
            FilterField::new("paymentStatus", "Payment", FilterKind::Choice(PAYMENT_CHOICES)),
            FilterField::status("status"),
            FilterField::new("fromDate", "Assigned from", FilterKind::DateFrom),
            FilterField::new("toDate", "Assigned to", FilterKind::DateTo),
        ];
        FIELDS
    }

    fn receipt(&self) -> Option<Receipt> {
        Some(Receipt {
            number: self
                .receipt_no
                .clone()
                .unwrap_or_else(|| self.id.clone()),
            student: self.student_name(),
            course: self.course_name(),
            total: self.total_amount.unwrap_or(0.0),
            paid: self.paid_amount.unwrap_or(0.0),
            balance: self.balance().unwrap_or(0.0),
            due_date: self.due_date,
            payment_status: self
                .payment_status
                .clone()
                .unwrap_or_else(|| "Pending".to_string()),
            issued_on: self.created_at.map(|ts| ts.date_naive()),
        })
    }
}
