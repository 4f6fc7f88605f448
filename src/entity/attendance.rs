use chrono::{DateTime, NaiveDate, Utc};
use ratatui::layout::Constraint;
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Related, format_date, lenient_date, lenient_timestamp};
use crate::listing::criteria::{Choice, FilterField, FilterKind};
use crate::listing::field::FieldValue;
use crate::listing::page::PaginationStrategy;
use crate::ui::ColumnDef;

const ATTENDANCE_CHOICES: &[Choice] = &[
    ("Present", "Present"),
    ("Absent", "Absent"),
    ("Late", "Late"),
];

/// One student's attendance on one day of a course.
///
/// Student and course filters are typed as names and resolved into
/// identifier lists before the attendance query is sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "studentId")]
    pub student: Option<Related>,
    #[serde(default, alias = "courseId")]
    pub course: Option<Related>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<NaiveDate>,
    #[serde(default, alias = "attendanceStatus")]
    pub status: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Attendance {
    fn student_name(&self) -> String {
        self.student.as_ref().map_or_else(String::new, Related::display)
    }

    fn course_name(&self) -> String {
        self.course.as_ref().map_or_else(String::new, Related::display)
    }
}

impl Entity for Attendance {
    const RESOURCE: &'static str = "attendance";
    const TITLE: &'static str = "Attendance";
    const NOUN: &'static str = "attendance record";
    const STRATEGY: PaginationStrategy = PaginationStrategy::Server;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    fn label(&self) -> String {
        format!("{} on {}", self.student_name(), format_date(self.date))
    }

    fn columns() -> &'static [ColumnDef] {
        static COLUMNS: &[ColumnDef] = &[
            ColumnDef::sortable("studentName", "Student", Constraint::Min(18)),
            ColumnDef::sortable("courseName", "Course", Constraint::Min(18)),
            ColumnDef::sortable("date", "Date", Constraint::Length(10)),
            ColumnDef::sortable("status", "Status", Constraint::Length(8)),
            ColumnDef::new("Remarks", Constraint::Min(12)),
        ];
        COLUMNS
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.student_name(),
            self.course_name(),
            format_date(self.date),
            self.status.clone().unwrap_or_default(),
            self.remarks.clone().unwrap_or_default(),
        ]
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "studentName" => {
                FieldValue::opt_text(self.student.as_ref().and_then(Related::name))
            }
            "courseName" => FieldValue::opt_text(self.course.as_ref().and_then(Related::name)),
            "date" | "fromDate" | "toDate" => self.date.map_or(FieldValue::Missing, FieldValue::Date),
            "status" => FieldValue::opt_text(self.status.as_deref()),
            "createdAt" => FieldValue::opt_timestamp(self.created_at),
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
            FilterField::new(
                "courseName",
                "Course name",
                FilterKind::Lookup {
                    resource: "course",
                    param: "courseIds",
                },
            ),
            FilterField::new("status", "Status", FilterKind::Choice(ATTENDANCE_CHOICES)),
            FilterField::new("fromDate", "From date", FilterKind::DateFrom),
            FilterField::new("toDate", "To date", FilterKind::DateTo),
        ];
        FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_populated_and_bare_references() {
        let record: Attendance = serde_json::from_str(
            r#"{"_id":"a1","studentId":{"_id":"s1","name":"Ada"},"course":"c9",
                "date":"2026-10-01T00:00:00.000Z","status":"Present"}"#,
        )
        .unwrap();
        assert_eq!(record.cells()[0], "Ada");
        assert_eq!(record.cells()[1], "c9");
        assert_eq!(record.cells()[2], "2026-10-01");
        assert_eq!(
            record.field("fromDate").as_date(),
            NaiveDate::from_ymd_opt(2026, 10, 1)
        );
    }
}
