use crossterm::event::KeyCode;

use crate::config::key::{Key, KeyBinding};
use crate::config::keybindings::{
    DialogKeybindings, FilterKeybindings, GlobalKeybindings, ListKeybindings,
    NavigationKeybindings,
};

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::char('q').into(),
            help: Key::char('?').into(),
            theme: Key::char('t').into(),
            back: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::char('k'), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![Key::char('j'), Key::new(KeyCode::Down)]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![Key::char('g'), Key::new(KeyCode::Home)]),
            end: KeyBinding::multiple(vec![Key::char('G'), Key::new(KeyCode::End)]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for ListKeybindings {
    fn default() -> Self {
        Self {
            view: KeyBinding::multiple(vec![Key::new(KeyCode::Enter), Key::char('v')]),
            new: Key::char('n').into(),
            edit: Key::char('e').into(),
            delete: KeyBinding::multiple(vec![Key::char('d'), Key::new(KeyCode::Delete)]),
            toggle_status: Key::char('a').into(),
            receipt: Key::char('p').into(),
            reload: KeyBinding::multiple(vec![Key::char('r'), Key::with_ctrl(KeyCode::Char('r'))]),
            filter: KeyBinding::multiple(vec![Key::char('/'), Key::char('f')]),
            reset_filters: Key::char('R').into(),
            next_page: KeyBinding::multiple(vec![Key::char('l'), Key::new(KeyCode::Right)]),
            prev_page: KeyBinding::multiple(vec![Key::char('h'), Key::new(KeyCode::Left)]),
            first_page: Key::char('<').into(),
            last_page: Key::char('>').into(),
            jump_to_page: Key::char(':').into(),
            page_size: Key::char('z').into(),
            sort_column_next: Key::char(']').into(),
            sort_column_prev: Key::char('[').into(),
            sort: Key::char('s').into(),
        }
    }
}

impl Default for FilterKeybindings {
    fn default() -> Self {
        Self {
            next_field: KeyBinding::multiple(vec![Key::new(KeyCode::Tab), Key::new(KeyCode::Down)]),
            prev_field: KeyBinding::multiple(vec![Key::new(KeyCode::BackTab), Key::new(KeyCode::Up)]),
            cycle_choice: KeyBinding::multiple(vec![Key::char(' '), Key::new(KeyCode::Right)]),
            apply: Key::new(KeyCode::Enter).into(),
            close: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            confirm: KeyBinding::multiple(vec![
                Key::char('y'),
                Key::char('Y'),
                Key::new(KeyCode::Enter),
            ]),
            cancel: KeyBinding::multiple(vec![
                Key::char('n'),
                Key::char('N'),
                Key::new(KeyCode::Esc),
            ]),
            dismiss: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Esc),
                Key::char('q'),
            ]),
            copy: Key::char('y').into(),
            save: Key::char('s').into(),
        }
    }
}
