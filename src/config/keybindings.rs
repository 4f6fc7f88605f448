use serde::{Deserialize, Serialize};

use crate::config::key::KeyBinding;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub theme: KeyBinding,
    pub back: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListKeybindings {
    pub view: KeyBinding,
    pub new: KeyBinding,
    pub edit: KeyBinding,
    pub delete: KeyBinding,
    pub toggle_status: KeyBinding,
    pub receipt: KeyBinding,
    pub reload: KeyBinding,
    pub filter: KeyBinding,
    pub reset_filters: KeyBinding,
    pub next_page: KeyBinding,
    pub prev_page: KeyBinding,
    pub first_page: KeyBinding,
    pub last_page: KeyBinding,
    pub jump_to_page: KeyBinding,
    pub page_size: KeyBinding,
    pub sort_column_next: KeyBinding,
    pub sort_column_prev: KeyBinding,
    pub sort: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterKeybindings {
    pub next_field: KeyBinding,
    pub prev_field: KeyBinding,
    pub cycle_choice: KeyBinding,
    pub apply: KeyBinding,
    pub close: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub confirm: KeyBinding,
    pub cancel: KeyBinding,
    pub dismiss: KeyBinding,
    pub copy: KeyBinding,
    pub save: KeyBinding,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub list: ListKeybindings,
    pub filter: FilterKeybindings,
    pub dialog: DialogKeybindings,
}
