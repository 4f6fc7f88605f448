use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::Theme;
use crate::config::{DialogAction, KeyResolver, NavAction};
use crate::ui::{Component, EventResult, Result};

const SCROLL_PAGE: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextViewerEvent {
    Closed,
    Copy,
    Save,
}

/// Read-only scrollable text popup.
pub struct TextViewer {
    title: String,
    lines: Vec<String>,
    scroll: u16,
    can_copy: bool,
    can_save: bool,
    resolver: Arc<KeyResolver>,
}

impl TextViewer {
    pub fn new(title: impl Into<String>, text: &str, resolver: Arc<KeyResolver>) -> Self {
        Self {
            title: title.into(),
            lines: text.lines().map(str::to_string).collect(),
            scroll: 0,
            can_copy: false,
            can_save: false,
            resolver,
        }
    }

    pub const fn with_copy(mut self) -> Self {
        self.can_copy = true;
        self
    }

    pub const fn with_save(mut self) -> Self {
        self.can_save = true;
        self
    }

    fn max_scroll(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = i32::from(self.scroll) + delta;
        self.scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX).min(self.max_scroll());
    }

    fn hints(&self, theme: &Theme) -> Line<'static> {
        let key_style = Style::default().fg(theme.peach());
        let text_style = Style::default().fg(theme.subtext0());
        let mut spans = Vec::new();
        let mut push = |key: String, label: &'static str| {
            spans.push(Span::styled(key, key_style));
            spans.push(Span::styled(format!(" {label}  "), text_style));
        };
        if self.can_copy {
            push(self.resolver.display_dialog(DialogAction::Copy), "copy");
        }
        if self.can_save {
            push(self.resolver.display_dialog(DialogAction::Save), "save");
        }
        push(self.resolver.display_dialog(DialogAction::Dismiss), "close");
        Line::from(spans)
    }
}

impl Component for TextViewer {
    type Output = TextViewerEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.can_copy && self.resolver.matches_dialog(&key, DialogAction::Copy) {
            return Ok(TextViewerEvent::Copy.into());
        }
        if self.can_save && self.resolver.matches_dialog(&key, DialogAction::Save) {
            return Ok(TextViewerEvent::Save.into());
        }
        if self.resolver.matches_dialog(&key, DialogAction::Dismiss) {
            return Ok(TextViewerEvent::Closed.into());
        }

        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.scroll_by(1);
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            self.scroll_by(-1);
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            self.scroll_by(i32::from(SCROLL_PAGE));
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            self.scroll_by(-i32::from(SCROLL_PAGE));
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            self.scroll = 0;
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            self.scroll = self.max_scroll();
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(70), Constraint::Percentage(75));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let lines: Vec<Line> = self
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(theme.text()))))
            .collect();
        frame.render_widget(Paragraph::new(lines).scroll((self.scroll, 0)), body);
        frame.render_widget(Paragraph::new(self.hints(theme)), footer);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::config::keybindings::KeybindingsConfig;

    fn resolver() -> Arc<KeyResolver> {
        Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())))
    }

    fn press(viewer: &mut TextViewer, code: KeyCode) -> EventResult<TextViewerEvent> {
        viewer
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn test_copy_only_when_enabled() {
        let mut plain = TextViewer::new("Detail", "{}", resolver());
        assert!(matches!(press(&mut plain, KeyCode::Char('y')), EventResult::Consumed));

        let mut receipt = TextViewer::new("Receipt", "RECEIPT", resolver()).with_copy();
        assert!(matches!(
            press(&mut receipt, KeyCode::Char('y')),
            EventResult::Event(TextViewerEvent::Copy)
        ));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut viewer = TextViewer::new("Detail", "a\nb\nc", resolver());
        press(&mut viewer, KeyCode::Char('k'));
        assert_eq!(viewer.scroll, 0);
        for _ in 0..5 {
            press(&mut viewer, KeyCode::Char('j'));
        }
        assert_eq!(viewer.scroll, 2);
        assert!(matches!(
            press(&mut viewer, KeyCode::Esc),
            EventResult::Event(TextViewerEvent::Closed)
        ));
    }
}
