//! The filter bar shown above every entity table.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::Theme;
use crate::config::{FilterAction, KeyResolver};
use crate::listing::criteria::{Choice, FilterCriteria, FilterField, FilterKind};
use crate::ui::{Component, EventResult, Result, TextInput};

/// Height of the bar including its border.
pub const FILTER_BAR_HEIGHT: u16 = 3;

enum FieldInput {
    Text(TextInput),
    Choice {
        choices: &'static [Choice],
        selected: Option<usize>,
    },
}

impl FieldInput {
    fn for_field(field: &FilterField) -> Self {
        match field.kind {
            FilterKind::Choice(choices) => Self::Choice {
                choices,
                selected: None,
            },
            FilterKind::Date | FilterKind::DateFrom | FilterKind::DateTo => {
                Self::Text(TextInput::new(field.label).with_placeholder("YYYY-MM-DD"))
            }
            FilterKind::Lookup { .. } => Self::Text(TextInput::new(field.label).with_placeholder("name")),
            FilterKind::Text => Self::Text(TextInput::new(field.label).with_placeholder("any")),
        }
    }

    fn value(&self) -> String {
        match self {
            Self::Text(input) => input.value().to_string(),
            Self::Choice { choices, selected } => selected
                .and_then(|i| choices.get(i))
                .map(|(value, _)| (*value).to_string())
                .unwrap_or_default(),
        }
    }

    fn set(&mut self, value: Option<&str>) {
        match self {
            Self::Text(input) => input.set_value(value.unwrap_or_default()),
            Self::Choice { choices, selected } => {
                *selected = value.and_then(|v| choices.iter().position(|(c, _)| c.eq_ignore_ascii_case(v)));
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterEvent {
    Apply(FilterCriteria),
    Close,
}

/// Inputs for an entity's filter fields.
///
/// Editing only changes the form. Criteria reach the controller when the
/// user applies them.
pub struct FilterForm {
    fields: &'static [FilterField],
    inputs: Vec<FieldInput>,
    focus: usize,
    active: bool,
    resolver: Arc<KeyResolver>,
}

impl FilterForm {
    pub fn new(fields: &'static [FilterField], resolver: Arc<KeyResolver>) -> Self {
        Self {
            fields,
            inputs: fields.iter().map(FieldInput::for_field).collect(),
            focus: 0,
            active: false,
            resolver,
        }
    }

    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Focus the form. Forms without fields stay inactive.
    pub fn activate(&mut self) {
        self.active = !self.fields.is_empty();
    }

    pub const fn deactivate(&mut self) {
        self.active = false;
    }

    /// Criteria from the current input values.
    pub fn criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        for (field, input) in self.fields.iter().zip(&self.inputs) {
            criteria.set(field.key, input.value());
        }
        criteria
    }

    /// Show `criteria` in the inputs.
    pub fn load(&mut self, criteria: &FilterCriteria) {
        for (field, input) in self.fields.iter().zip(self.inputs.iter_mut()) {
            input.set(criteria.get(field.key));
        }
    }

    pub fn reset(&mut self) {
        self.load(&FilterCriteria::new());
        self.focus = 0;
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.inputs.len();
        if len == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    fn field_spans(&self, index: usize, theme: &Theme) -> Vec<Span<'static>> {
        let focused = self.active && index == self.focus;
        let label_style = if focused {
            Style::default()
                .fg(theme.lavender())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.subtext0())
        };

        let mut spans = vec![Span::styled(format!("{}: ", self.fields[index].label), label_style)];
        match &self.inputs[index] {
            FieldInput::Text(input) => spans.extend(input.spans(focused, theme)),
            FieldInput::Choice { choices, selected } => {
                let label = selected
                    .and_then(|i| choices.get(i))
                    .map_or("All", |(_, label)| label);
                let style = if focused {
                    Style::default().fg(theme.base()).bg(theme.lavender())
                } else {
                    Style::default().fg(theme.text())
                };
                spans.push(Span::styled(format!("‹{label}›"), style));
            }
        }
        spans.push(Span::raw("   "));
        spans
    }
}

impl Component for FilterForm {
    type Output = FilterEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if !self.active {
            return Ok(EventResult::Ignored);
        }
        if self.resolver.matches_filter(&key, FilterAction::Apply) {
            self.deactivate();
            return Ok(FilterEvent::Apply(self.criteria()).into());
        }
        if self.resolver.matches_filter(&key, FilterAction::Close) {
            self.deactivate();
            return Ok(FilterEvent::Close.into());
        }
        if self.resolver.matches_filter(&key, FilterAction::NextField) {
            self.move_focus(true);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_filter(&key, FilterAction::PrevField) {
            self.move_focus(false);
            return Ok(EventResult::Consumed);
        }

        let cycle = self.resolver.matches_filter(&key, FilterAction::CycleChoice);
        match &mut self.inputs[self.focus] {
            FieldInput::Text(input) => {
                input.handle_key(key)?;
            }
            FieldInput::Choice { choices, selected } => {
                if cycle {
                    *selected = match *selected {
                        None if !choices.is_empty() => Some(0),
                        Some(i) if i + 1 < choices.len() => Some(i + 1),
                        _ => None,
                    };
                } else if matches!(key.code, KeyCode::Backspace | KeyCode::Delete) {
                    *selected = None;
                }
            }
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.active {
            theme.border_focused()
        } else {
            theme.border()
        };
        let block = Block::default()
            .title(" Filters ")
            .title_style(Style::default().fg(theme.subtext1()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));

        let spans: Vec<Span> = (0..self.fields.len())
            .flat_map(|i| self.field_spans(i, theme))
            .collect();
        let line = if spans.is_empty() {
            Line::from(Span::styled("No filters", Style::default().fg(theme.overlay0())))
        } else {
            Line::from(spans)
        };

        frame.render_widget(
            Paragraph::new(line).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::config::keybindings::KeybindingsConfig;

    static FIELDS: &[FilterField] = &[
        FilterField::text("name", "Name"),
        FilterField::status("status"),
        FilterField::new("fromDate", "From", FilterKind::DateFrom),
    ];

    fn form() -> FilterForm {
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        let mut form = FilterForm::new(FIELDS, resolver);
        form.activate();
        form
    }

    fn press(form: &mut FilterForm, code: KeyCode) -> EventResult<FilterEvent> {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap()
    }

    #[test]
    fn test_typing_and_choices_build_criteria() {
        let mut form = form();
        for c in "ada l".chars() {
            press(&mut form, KeyCode::Char(c));
        }
        press(&mut form, KeyCode::Tab);
        press(&mut form, KeyCode::Char(' '));
        press(&mut form, KeyCode::Char(' '));

        let criteria = form.criteria();
        assert_eq!(criteria.get("name"), Some("ada l"));
        assert_eq!(criteria.get("status"), Some("N"));
        assert_eq!(criteria.get("fromDate"), None);
    }

    #[test]
    fn test_choice_cycles_back_to_all() {
        let mut form = form();
        press(&mut form, KeyCode::Tab);
        for _ in 0..3 {
            press(&mut form, KeyCode::Char(' '));
        }
        assert_eq!(form.criteria().get("status"), None);
    }

    #[test]
    fn test_apply_emits_criteria_and_releases_focus() {
        let mut form = form();
        press(&mut form, KeyCode::BackTab);
        for c in "2026-01-01".chars() {
            press(&mut form, KeyCode::Char(c));
        }
        let result = press(&mut form, KeyCode::Enter);
        let EventResult::Event(FilterEvent::Apply(criteria)) = result else {
            panic!("expected apply");
        };
        assert_eq!(criteria.get("fromDate"), Some("2026-01-01"));
        assert!(!form.is_active());
        assert!(matches!(press(&mut form, KeyCode::Char('x')), EventResult::Ignored));
    }

    #[test]
    fn test_load_and_reset() {
        let mut form = form();
        form.load(&FilterCriteria::new().with("name", "Grace").with("status", "y"));
        assert_eq!(form.criteria().get("status"), Some("Y"));
        assert_eq!(form.criteria().get("name"), Some("Grace"));
        form.reset();
        assert!(form.criteria().is_empty());
    }
}
