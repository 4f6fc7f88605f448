//! Fee receipts.
//!
//! A [`Receipt`] is a plain projection of a fee assignment. Rendering it is a
//! pure function from the projection to a text document, so printing or
//! exporting never has to reach back into UI state.

use std::fmt::Write as _;

use chrono::NaiveDate;

use crate::entity::format_date;

const WIDTH: usize = 44;

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub number: String,
    pub student: String,
    pub course: String,
    pub total: f64,
    pub paid: f64,
    pub balance: f64,
    pub due_date: Option<NaiveDate>,
    pub payment_status: String,
    pub issued_on: Option<NaiveDate>,
}

impl Receipt {
    /// Render the receipt as a fixed-width text document.
    pub fn render_text(&self) -> String {
        let rule = "=".repeat(WIDTH);
        let thin = "-".repeat(WIDTH);
        let mut out = String::new();

        let _ = writeln!(out, "{rule}");
        let _ = writeln!(out, "{:^WIDTH$}", "FEE RECEIPT");
        let _ = writeln!(out, "{rule}");
        line(&mut out, "Receipt no.", &self.number);
        line(&mut out, "Issued", &format_date(self.issued_on));
        let _ = writeln!(out, "{thin}");
        line(&mut out, "Student", &self.student);
        line(&mut out, "Course", &self.course);
        let _ = writeln!(out, "{thin}");
        line(&mut out, "Total fee", &format!("{:.2}", self.total));
        line(&mut out, "Paid", &format!("{:.2}", self.paid));
        line(&mut out, "Balance", &format!("{:.2}", self.balance));
        line(&mut out, "Due date", &format_date(self.due_date));
        line(&mut out, "Payment status", &self.payment_status);
        let _ = writeln!(out, "{rule}");
        out
    }

    /// Suggested file name for a saved copy.
    pub fn file_name(&self) -> String {
        let slug: String = self
            .number
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
            .collect();
        format!("receipt-{slug}.txt")
    }
}

/// `label` left, `value` right. Values that do not fit end in an ellipsis.
fn line(out: &mut String, label: &str, value: &str) {
    let width = WIDTH.saturating_sub(label.chars().count() + 1);
    let value = if value.chars().count() > width {
        let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    } else {
        value.to_string()
    };
    let _ = writeln!(out, "{label} {value:>width$}");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt() -> Receipt {
        Receipt {
            number: "R/0042".to_string(),
            student: "Ada Lovelace".to_string(),
            course: "Rust 101".to_string(),
            total: 1500.0,
            paid: 500.0,
            balance: 1000.0,
            due_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            payment_status: "Partial".to_string(),
            issued_on: NaiveDate::from_ymd_opt(2026, 10, 1),
        }
    }

    #[test]
    fn test_render_contains_every_field() {
        let text = receipt().render_text();
        for expected in [
            "FEE RECEIPT",
            "R/0042",
            "2026-10-01",
            "Ada Lovelace",
            "Rust 101",
            "1500.00",
            "500.00",
            "1000.00",
            "2026-11-01",
            "Partial",
        ] {
            assert!(text.contains(expected), "missing {expected}");
        }
    }

    #[test]
    fn test_lines_are_fixed_width() {
        let text = receipt().render_text();
        assert!(text.lines().all(|l| l.chars().count() == WIDTH));

        let long = Receipt {
            student: "Maria Salomea Skłodowska-Curie of Warsaw and Paris".to_string(),
            course: "Advanced Topics in Radioactivity and Nuclear Chemistry".to_string(),
            ..receipt()
        };
        let text = long.render_text();
        assert!(text.lines().all(|l| l.chars().count() == WIDTH));
        assert!(text.contains("Student Maria Salomea"));
        assert!(text.lines().any(|l| l.starts_with("Course ") && l.ends_with('…')));
    }

    #[test]
    fn test_file_name_is_sanitised() {
        assert_eq!(receipt().file_name(), "receipt-R-0042.txt");
    }
}
