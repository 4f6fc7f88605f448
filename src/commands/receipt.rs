use std::path::PathBuf;

use async_trait::async_trait;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::app::AppMessage;
use crate::commands::Command;
use crate::receipt::Receipt;
use crate::ui::ToastType;

/// Write a receipt as a text file into the download directory.
pub struct SaveReceiptCmd {
    receipt: Receipt,
    dir: PathBuf,
}

impl SaveReceiptCmd {
    pub fn new(receipt: Receipt) -> Self {
        let dir = dirs::download_dir().unwrap_or_else(|| PathBuf::from("."));
        Self { receipt, dir }
    }

    #[cfg(test)]
    fn into_dir(receipt: Receipt, dir: PathBuf) -> Self {
        Self { receipt, dir }
    }
}

#[async_trait]
impl Command for SaveReceiptCmd {
    fn name(&self) -> String {
        format!("Saving receipt {}", self.receipt.number)
    }

    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> Result<()> {
        let path = self.dir.join(self.receipt.file_name());
        tokio::fs::write(&path, self.receipt.render_text()).await?;
        info!(path = %path.display(), "saved receipt");
        app_tx.send(AppMessage::ShowToast {
            message: format!("Saved {}", path.display()),
            toast_type: ToastType::Success,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test]
    async fn test_writes_rendered_receipt() {
        let dir = std::env::temp_dir().join(format!("campusdesk-receipt-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let receipt = Receipt {
            number: "R-7".to_string(),
            student: "Ada Lovelace".to_string(),
            course: "Analytical Engines".to_string(),
            total: 500.0,
            paid: 200.0,
            balance: 300.0,
            due_date: None,
            payment_status: "Partial".to_string(),
            issued_on: None,
        };
        let expected = receipt.render_text();
        let path = dir.join(receipt.file_name());

        let (tx, mut rx) = mpsc::unbounded_channel();
        Box::new(SaveReceiptCmd::into_dir(receipt, dir.clone()))
            .execute(tx)
            .await
            .unwrap();

        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), expected);
        assert!(matches!(
            rx.recv().await,
            Some(AppMessage::ShowToast { toast_type: ToastType::Success, .. })
        ));
        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
