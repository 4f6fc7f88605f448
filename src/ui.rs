pub mod components;
pub mod widgets;

mod alert_dialog;
mod help;
mod pager;
mod status_bar;
mod toast;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use color_eyre::Result;

use crate::Theme;

pub use components::{
    ColumnDef, ConfirmDialog, ConfirmEvent, Table, TableEvent, TableRow, TextInput,
    TextInputEvent, TextViewer, TextViewerEvent,
};

pub use widgets::Spinner;

pub use alert_dialog::{AlertDialog, AlertEvent};
pub use help::{HelpEvent, HelpOverlay, Keybinding, KeybindingSection};
pub use pager::Pager;
pub use status_bar::{STATUS_BAR_HEIGHT, StatusBar};
pub use toast::{Toast, ToastManager, ToastType};

/// Result of handling an input event.
///
/// - `Ignored` - the handler did not recognise the input, the parent should process it
/// - `Consumed` - the input was handled without producing anything
/// - `Event(E)` - the input was handled and produced an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    Ignored,
    Consumed,
    Event(E),
}

impl<E> EventResult<E> {
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Extension trait for processing `Result<EventResult<T>>` from component handlers.
pub trait EventResultExt<T> {
    /// Split into (was consumed, optional event). Errors count as ignored.
    fn process(self) -> (bool, Option<T>);
}

impl<T> EventResultExt<T> for Result<EventResult<T>> {
    fn process(self) -> (bool, Option<T>) {
        match self {
            Ok(EventResult::Event(event)) => (true, Some(event)),
            Ok(EventResult::Consumed) => (true, None),
            Ok(EventResult::Ignored) | Err(_) => (false, None),
        }
    }
}

/// Interactive UI building block.
///
/// Components handle input and emit generic outputs. They know nothing about
/// entities or the backend; pages translate their events into list operations.
pub trait Component {
    type Output;

    /// Handle a key event.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for animations and time-based updates.
    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_splits_results() {
        let event: Result<EventResult<u8>> = Ok(EventResult::Event(3));
        assert_eq!(event.process(), (true, Some(3)));

        let consumed: Result<EventResult<u8>> = Ok(EventResult::Consumed);
        assert_eq!(consumed.process(), (true, None));

        let failed: Result<EventResult<u8>> = Err(color_eyre::eyre::eyre!("boom"));
        assert_eq!(failed.process(), (false, None));
    }
}
