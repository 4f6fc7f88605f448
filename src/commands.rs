//! Async commands for side effects.
//!
//! Pages return commands from `update()` and the App spawns them. A command
//! reports back either to its page's own channel or to the App.

mod clipboard;
mod receipt;

use async_trait::async_trait;
use color_eyre::Result;
use tokio::sync::mpsc::UnboundedSender;

pub use clipboard::CopyReceiptCmd;
pub use receipt::SaveReceiptCmd;

use crate::app::AppMessage;

#[async_trait]
pub trait Command: Send + 'static {
    /// Human-readable name for logs.
    fn name(&self) -> String;

    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> Result<()>;
}
