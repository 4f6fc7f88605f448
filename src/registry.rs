//! Registry of the list pages offered on the start screen.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::Cell;

use crate::Theme;
use crate::config::KeyResolver;
use crate::entity::Entity;
use crate::listing::{EntityPage, PaginationStrategy};
use crate::page::{Page, PageContext};
use crate::ui::{ColumnDef, Component, EventResult, Result, Table, TableEvent, TableRow};

type PageFactory = fn(&PageContext) -> Box<dyn Page>;

/// One openable page.
#[derive(Clone, Copy)]
pub struct PageEntry {
    /// Stable key used on the command line.
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub strategy: PaginationStrategy,
    factory: PageFactory,
}

impl PageEntry {
    pub fn create(&self, ctx: &PageContext) -> Box<dyn Page> {
        (self.factory)(ctx)
    }
}

/// Pages in registration order.
#[derive(Default)]
pub struct PageRegistry {
    entries: Vec<PageEntry>,
}

impl PageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the list page of `E` under `key`. A later registration with
    /// the same key replaces the earlier one.
    pub fn register_entity<E: Entity>(&mut self, key: &'static str, description: &'static str) {
        fn build<E: Entity>(ctx: &PageContext) -> Box<dyn Page> {
            Box::new(EntityPage::<E>::new(ctx.clone()))
        }

        let entry = PageEntry {
            key,
            title: E::TITLE,
            description,
            strategy: E::STRATEGY,
            factory: build::<E>,
        };
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, key: &str) -> Option<&PageEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn all(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.key).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl TableRow for PageEntry {
    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>> {
        let paging = match self.strategy {
            PaginationStrategy::Server => "server",
            PaginationStrategy::FetchAllLocal => "local",
        };
        vec![
            Cell::from(self.title),
            Cell::from(self.key).style(Style::default().fg(theme.subtext0())),
            Cell::from(paging).style(Style::default().fg(theme.overlay1())),
            Cell::from(self.description),
        ]
    }
}

/// Start screen listing every registered page.
pub struct PageSelector {
    table: Table<PageEntry>,
}

impl PageSelector {
    pub fn new(registry: &PageRegistry, resolver: Arc<KeyResolver>) -> Self {
        let columns = vec![
            ColumnDef::new("Page", Constraint::Length(22)),
            ColumnDef::new("Key", Constraint::Length(13)),
            ColumnDef::new("Paging", Constraint::Length(8)),
            ColumnDef::new("Description", Constraint::Min(30)),
        ];
        let mut table = Table::new(columns, resolver).with_title(" campusdesk ");
        table.set_rows(registry.all().to_vec());
        Self { table }
    }
}

impl Component for PageSelector {
    type Output = &'static str;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        Ok(match self.table.handle_key(key)? {
            EventResult::Event(TableEvent::Activated(entry)) => entry.key.into(),
            EventResult::Consumed => EventResult::Consumed,
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.table.render(frame, area, theme);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::entity::{Course, Faq, register_all};

    fn resolver() -> Arc<KeyResolver> {
        Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())))
    }

    #[test]
    fn test_register_all_covers_every_entity() {
        let mut registry = PageRegistry::new();
        register_all(&mut registry);
        assert_eq!(
            registry.keys(),
            vec!["users", "courses", "attendance", "fees", "faqs", "newsletters"]
        );
        assert_eq!(
            registry.get("faqs").map(|e| e.strategy),
            Some(PaginationStrategy::FetchAllLocal)
        );
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_reregistering_replaces_entry() {
        let mut registry = PageRegistry::new();
        registry.register_entity::<Course>("items", "first");
        registry.register_entity::<Faq>("items", "second");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("items").map(|e| e.title), Some("FAQs"));
    }

    #[test]
    fn test_selector_emits_activated_key() {
        let mut registry = PageRegistry::new();
        register_all(&mut registry);
        let mut selector = PageSelector::new(&registry, resolver());

        selector
            .handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
            .unwrap();
        let result = selector
            .handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .unwrap();
        assert_eq!(result, EventResult::Event("courses"));
    }
}
