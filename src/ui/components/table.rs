use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::prelude::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Cell, Paragraph, Row, Table as TableWidget, TableState,
};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::ui::{Component, EventResult, Result};

const PAGE_STEP: usize = 10;

pub enum TableEvent<T> {
    Activated(T),
}

/// A table column. Columns with a `sort_key` can be focused and sorted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub header: &'static str,
    pub constraint: Constraint,
    pub sort_key: Option<&'static str>,
}

impl ColumnDef {
    pub const fn new(header: &'static str, constraint: Constraint) -> Self {
        Self {
            header,
            constraint,
            sort_key: None,
        }
    }

    pub const fn sortable(key: &'static str, header: &'static str, constraint: Constraint) -> Self {
        Self {
            header,
            constraint,
            sort_key: Some(key),
        }
    }
}

pub trait TableRow: Clone {
    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>>;
}

/// Selectable table with an optional focused column for sorting.
pub struct Table<T: TableRow> {
    columns: Vec<ColumnDef>,
    rows: Vec<T>,
    state: TableState,
    title: Option<String>,
    empty_message: String,
    focused_column: Option<usize>,
    /// Sort key and direction arrow shown next to the sorted header.
    sort: Option<(&'static str, &'static str)>,
    resolver: Arc<KeyResolver>,
}

impl<T: TableRow> Table<T> {
    pub fn new(columns: Vec<ColumnDef>, resolver: Arc<KeyResolver>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            state: TableState::default(),
            title: None,
            empty_message: "No records found".to_string(),
            focused_column: None,
            sort: None,
            resolver,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_empty_message(&mut self, message: impl Into<String>) {
        self.empty_message = message.into();
    }

    /// Replace the rows, keeping the selection index where possible.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if self.rows.is_empty() {
            self.state.select(None);
        } else {
            let index = self.state.selected().unwrap_or(0).min(self.rows.len() - 1);
            self.state.select(Some(index));
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.rows.get(i))
    }

    pub fn set_sort(&mut self, sort: Option<(&'static str, &'static str)>) {
        self.sort = sort;
    }

    /// Sort key of the focused column.
    pub fn focused_sort_key(&self) -> Option<&'static str> {
        self.focused_column
            .and_then(|i| self.columns.get(i))
            .and_then(|c| c.sort_key)
    }

    pub fn focus_next_column(&mut self) {
        let sortable = self.sortable_columns();
        if sortable.is_empty() {
            return;
        }
        let next = match self.focused_column {
            Some(current) => sortable
                .iter()
                .copied()
                .find(|&i| i > current)
                .unwrap_or(sortable[0]),
            None => sortable[0],
        };
        self.focused_column = Some(next);
    }

    pub fn focus_prev_column(&mut self) {
        let sortable = self.sortable_columns();
        let Some(&last) = sortable.last() else {
            return;
        };
        let prev = match self.focused_column {
            Some(current) => sortable
                .iter()
                .rev()
                .copied()
                .find(|&i| i < current)
                .unwrap_or(last),
            None => last,
        };
        self.focused_column = Some(prev);
    }

    fn sortable_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.sort_key.is_some())
            .map(|(i, _)| i)
            .collect()
    }

    fn select(&mut self, index: usize) {
        if !self.rows.is_empty() {
            self.state.select(Some(index.min(self.rows.len() - 1)));
        }
    }

    fn header_cell(&self, index: usize, column: &ColumnDef, theme: &Theme) -> Cell<'static> {
        let mut style = Style::default()
            .fg(theme.header())
            .add_modifier(Modifier::BOLD);
        if self.focused_column == Some(index) {
            style = style.fg(theme.lavender()).add_modifier(Modifier::UNDERLINED);
        }
        let arrow = match (self.sort, column.sort_key) {
            (Some((key, arrow)), Some(column_key)) if key == column_key => format!(" {arrow}"),
            _ => String::new(),
        };
        Cell::from(format!("{}{arrow}", column.header)).style(style)
    }
}

impl<T: TableRow> Component for Table<T> {
    type Output = TableEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        let current = self.state.selected().unwrap_or(0);

        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.select(current + 1);
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            self.select(current.saturating_sub(1));
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            self.select(current + PAGE_STEP);
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            self.select(current.saturating_sub(PAGE_STEP));
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            self.select(0);
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            self.select(usize::MAX);
        } else if self.resolver.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .selected()
                .cloned()
                .map_or(EventResult::Ignored, |row| TableEvent::Activated(row).into()));
        } else {
            return Ok(EventResult::Ignored);
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()));
        if let Some(title) = &self.title {
            block = block.title(title.clone()).title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            );
        }

        let header = Row::new(
            self.columns
                .iter()
                .enumerate()
                .map(|(i, c)| self.header_cell(i, c, theme))
                .collect::<Vec<_>>(),
        )
        .height(1)
        .style(Style::default().bg(theme.surface0()));

        if self.rows.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let widths: Vec<Constraint> = self.columns.iter().map(|c| c.constraint).collect();
            frame.render_widget(TableWidget::new(Vec::<Row>::new(), widths).header(header), inner);
            let message = Paragraph::new(Line::from(Span::styled(
                self.empty_message.clone(),
                Style::default().fg(theme.overlay1()),
            )))
            .alignment(Alignment::Center);
            let message_area = inner.centered(Constraint::Percentage(100), Constraint::Length(1));
            frame.render_widget(message, message_area);
            return;
        }

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| Row::new(row.render_cells(theme)).style(Style::default().fg(theme.text())))
            .collect();
        let widths: Vec<Constraint> = self.columns.iter().map(|c| c.constraint).collect();

        let table = TableWidget::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.lavender())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, area, &mut self.state);
    }
}
