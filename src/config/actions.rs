#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    Quit,
    Help,
    Theme,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    Select,
}

/// Actions on an entity list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    View,
    New,
    Edit,
    Delete,
    ToggleStatus,
    Receipt,
    Reload,
    Filter,
    ResetFilters,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    JumpToPage,
    PageSize,
    SortColumnNext,
    SortColumnPrev,
    Sort,
}

/// Actions inside the filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAction {
    NextField,
    PrevField,
    CycleChoice,
    Apply,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogAction {
    Confirm,
    Cancel,
    Dismiss,
    Copy,
    Save,
}
