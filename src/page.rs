//! Pages hosted by the App.

use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::Theme;
use crate::api::Backend;
use crate::app::AppMessage;
use crate::commands::Command;
use crate::config::KeyResolver;
use crate::listing::PageSize;
use crate::ui::{EventResult, Keybinding};

pub enum PageMsg {
    Idle,
    Run(Vec<Box<dyn Command>>),
    /// Go back to the page selector.
    Close,
}

impl<T: Command> From<T> for PageMsg {
    fn from(value: T) -> Self {
        Self::Run(vec![Box::new(value)])
    }
}

/// What every page is built with.
#[derive(Clone)]
pub struct PageContext {
    pub backend: Arc<dyn Backend>,
    pub resolver: Arc<KeyResolver>,
    pub app_tx: UnboundedSender<AppMessage>,
    pub page_size: PageSize,
    pub lookup_limit: usize,
}

/// A full-screen page.
///
/// Pages own their state and message queue. The App calls:
///
/// 1. `init()` once when the page opens, then `update()`
/// 2. `handle_tick()` on every tick
/// 3. `handle_key()` for input, then `update()` if the key was consumed
/// 4. `update()` whenever a command completes
pub trait Page {
    fn init(&mut self) {}

    fn handle_tick(&mut self) {}

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()>;

    /// Process queued messages.
    fn update(&mut self) -> Result<PageMsg>;

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn breadcrumbs(&self) -> Vec<String>;

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}
