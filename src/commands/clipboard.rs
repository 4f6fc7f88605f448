use arboard::Clipboard;
use async_trait::async_trait;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::app::AppMessage;
use crate::commands::Command;
use crate::receipt::Receipt;
use crate::ui::ToastType;

/// Copy a rendered fee receipt to the system clipboard.
pub struct CopyReceiptCmd {
    number: String,
    text: String,
}

impl CopyReceiptCmd {
    pub fn new(receipt: &Receipt) -> Self {
        Self {
            number: receipt.number.clone(),
            text: receipt.render_text(),
        }
    }
}

#[async_trait]
impl Command for CopyReceiptCmd {
    fn name(&self) -> String {
        format!("Copying receipt {}", self.number)
    }

    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> Result<()> {
        let Self { number, text } = *self;
        Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text))
            .wrap_err("no system clipboard available")?;
        info!(receipt = %number, "copied receipt");
        app_tx.send(AppMessage::ShowToast {
            message: format!("Receipt {number} copied"),
            toast_type: ToastType::Success,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_copies_the_rendered_receipt() {
        let receipt = Receipt {
            number: "R-12".to_string(),
            student: "Grace Hopper".to_string(),
            course: "Compilers".to_string(),
            total: 900.0,
            paid: 900.0,
            balance: 0.0,
            due_date: NaiveDate::from_ymd_opt(2026, 12, 1),
            payment_status: "Paid".to_string(),
            issued_on: NaiveDate::from_ymd_opt(2026, 10, 16),
        };
        let cmd = CopyReceiptCmd::new(&receipt);
        assert_eq!(cmd.name(), "Copying receipt R-12");
        assert_eq!(cmd.text, receipt.render_text());
    }
}
