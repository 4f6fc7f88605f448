use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{DialogAction, FilterAction, GlobalAction, ListAction, NavAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Resolves key events against the configured bindings.
pub struct KeyResolver {
    pub keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Help => &kb.help,
            GlobalAction::Theme => &kb.theme,
            GlobalAction::Back => &kb.back,
        }
    }

    fn nav(&self, action: NavAction) -> &KeyBinding {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => &kb.up,
            NavAction::Down => &kb.down,
            NavAction::PageUp => &kb.page_up,
            NavAction::PageDown => &kb.page_down,
            NavAction::Home => &kb.home,
            NavAction::End => &kb.end,
            NavAction::Select => &kb.select,
        }
    }

    fn list(&self, action: ListAction) -> &KeyBinding {
        let kb = &self.keybindings.list;
        match action {
            ListAction::View => &kb.view,
            ListAction::New => &kb.new,
            ListAction::Edit => &kb.edit,
            ListAction::Delete => &kb.delete,
            ListAction::ToggleStatus => &kb.toggle_status,
            ListAction::Receipt => &kb.receipt,
            ListAction::Reload => &kb.reload,
            ListAction::Filter => &kb.filter,
            ListAction::ResetFilters => &kb.reset_filters,
            ListAction::NextPage => &kb.next_page,
            ListAction::PrevPage => &kb.prev_page,
            ListAction::FirstPage => &kb.first_page,
            ListAction::LastPage => &kb.last_page,
            ListAction::JumpToPage => &kb.jump_to_page,
            ListAction::PageSize => &kb.page_size,
            ListAction::SortColumnNext => &kb.sort_column_next,
            ListAction::SortColumnPrev => &kb.sort_column_prev,
            ListAction::Sort => &kb.sort,
        }
    }

    fn filter(&self, action: FilterAction) -> &KeyBinding {
        let kb = &self.keybindings.filter;
        match action {
            FilterAction::NextField => &kb.next_field,
            FilterAction::PrevField => &kb.prev_field,
            FilterAction::CycleChoice => &kb.cycle_choice,
            FilterAction::Apply => &kb.apply,
            FilterAction::Close => &kb.close,
        }
    }

    fn dialog(&self, action: DialogAction) -> &KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Confirm => &kb.confirm,
            DialogAction::Cancel => &kb.cancel,
            DialogAction::Dismiss => &kb.dismiss,
            DialogAction::Copy => &kb.copy,
            DialogAction::Save => &kb.save,
        }
    }

    // Global actions
    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    // Navigation actions
    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav(action).matches(event)
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        self.nav(action).display()
    }

    // List page actions
    pub fn matches_list(&self, event: &KeyEvent, action: ListAction) -> bool {
        self.list(action).matches(event)
    }

    pub fn display_list(&self, action: ListAction) -> String {
        self.list(action).display()
    }

    // Filter form actions
    pub fn matches_filter(&self, event: &KeyEvent, action: FilterAction) -> bool {
        self.filter(action).matches(event)
    }

    pub fn display_filter(&self, action: FilterAction) -> String {
        self.filter(action).display()
    }

    // Dialog actions
    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog(action).matches(event)
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog(action).display()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    fn resolver() -> KeyResolver {
        KeyResolver::new(Arc::new(KeybindingsConfig::default()))
    }

    #[test]
    fn test_reload_and_reset_are_distinct() {
        let r = resolver();
        let lower = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
        let upper = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert!(r.matches_list(&lower, ListAction::Reload));
        assert!(!r.matches_list(&lower, ListAction::ResetFilters));
        assert!(r.matches_list(&upper, ListAction::ResetFilters));
        assert!(!r.matches_list(&upper, ListAction::Reload));
    }

    #[test]
    fn test_display_joins_alternatives() {
        assert_eq!(resolver().display_list(ListAction::Delete), "d/Delete");
    }
}
