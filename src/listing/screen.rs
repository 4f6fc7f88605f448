//! The entity page: one generic list screen wiring the controller, renderer
//! and dispatcher to the table, filter bar and dialogs.

use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Cell};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::Theme;
use crate::app::AppMessage;
use crate::commands::{Command, CopyReceiptCmd, SaveReceiptCmd};
use crate::config::{FilterAction, KeyResolver, ListAction};
use crate::entity::{Entity, Status};
use crate::listing::command::{FetchPageCmd, MutateCmd};
use crate::listing::controller::{FetchRequest, ListController, LoadOutcome, LoadState};
use crate::listing::dispatch::{ActionDispatcher, Confirmation, DispatchOutcome, Mutation};
use crate::listing::filter_form::{FILTER_BAR_HEIGHT, FilterEvent, FilterForm};
use crate::listing::message::ListMsg;
use crate::listing::render::{RowView, row_views};
use crate::page::{Page, PageContext, PageMsg};
use crate::receipt::Receipt;
use crate::ui::{
    AlertDialog, AlertEvent, ColumnDef, Component, ConfirmDialog, ConfirmEvent, EventResult,
    EventResultExt, Keybinding, Pager, Spinner, Table, TableEvent, TableRow, TextInput,
    TextInputEvent, TextViewer, TextViewerEvent, ToastType,
};

const SERIAL_COLUMN: ColumnDef = ColumnDef::new("#", Constraint::Length(5));

impl TableRow for RowView {
    fn render_cells(&self, theme: &Theme) -> Vec<Cell<'static>> {
        let status_label = self.status.map(Status::label);
        let mut cells = vec![Cell::from(self.serial.to_string()).style(Style::default().fg(theme.overlay1()))];
        cells.extend(self.cells.iter().map(|text| {
            let cell = Cell::from(text.clone());
            match self.status {
                Some(status) if Some(text.as_str()) == status_label => {
                    let color = match status {
                        Status::Active => theme.green(),
                        Status::Inactive => theme.red(),
                    };
                    cell.style(Style::default().fg(color))
                }
                _ => cell,
            }
        }));
        cells
    }
}

enum Overlay<E> {
    None,
    Confirm(ConfirmDialog),
    Prompt {
        input: TextInput,
        existing: Option<E>,
    },
    JumpToPage(TextInput),
    Detail(TextViewer),
    Receipt {
        viewer: TextViewer,
        receipt: Receipt,
    },
    Alert(AlertDialog),
}

/// List page for entity type `E`.
pub struct EntityPage<E: Entity> {
    controller: ListController<E>,
    dispatcher: ActionDispatcher,
    table: Table<RowView>,
    filters: FilterForm,
    pager: Pager,
    spinner: Spinner,
    overlay: Overlay<E>,
    ctx: PageContext,
    msg_tx: UnboundedSender<ListMsg<E>>,
    msg_rx: UnboundedReceiver<ListMsg<E>>,
}

impl<E: Entity> EntityPage<E> {
    pub fn new(ctx: PageContext) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let columns = std::iter::once(SERIAL_COLUMN)
            .chain(E::columns().iter().copied())
            .collect();
        let mut table = Table::new(columns, ctx.resolver.clone()).with_title(format!(" {} ", E::TITLE));
        table.set_empty_message(format!("No {} found", E::TITLE.to_lowercase()));

        Self {
            controller: ListController::new(ctx.page_size),
            dispatcher: ActionDispatcher::new(),
            table,
            filters: FilterForm::new(E::filter_fields(), ctx.resolver.clone()),
            pager: Pager::new(),
            spinner: Spinner::new("Loading..."),
            overlay: Overlay::None,
            ctx,
            msg_tx,
            msg_rx,
        }
    }

    fn queue(&self, msg: ListMsg<E>) {
        let _ = self.msg_tx.send(msg);
    }

    fn resolver(&self) -> &KeyResolver {
        &self.ctx.resolver
    }

    fn toast(&self, message: impl Into<String>, toast_type: ToastType) {
        let _ = self.ctx.app_tx.send(AppMessage::ShowToast {
            message: message.into(),
            toast_type,
        });
    }

    fn alert(&mut self, title: &str, message: impl Into<String>) {
        self.overlay = Overlay::Alert(AlertDialog::new(title, message, self.ctx.resolver.clone()));
    }

    /// The record under the table cursor.
    fn selected(&self) -> Option<&E> {
        let row = self.table.selected()?;
        self.controller
            .result()
            .items
            .iter()
            .find(|item| item.id() == row.id)
    }

    fn fetch(&self, request: FetchRequest) -> PageMsg {
        FetchPageCmd::new(
            self.ctx.backend.clone(),
            request,
            self.ctx.lookup_limit,
            self.msg_tx.clone(),
        )
        .into()
    }

    fn fetch_or_sync(&mut self, request: Option<FetchRequest>) -> PageMsg {
        match request {
            Some(request) => self.fetch(request),
            None => {
                self.sync_view();
                PageMsg::Idle
            }
        }
    }

    fn mutate(&self, mutation: Mutation) -> PageMsg {
        MutateCmd::<E>::new(self.ctx.backend.clone(), mutation, self.msg_tx.clone()).into()
    }

    /// Push controller state into the widgets.
    fn sync_view(&mut self) {
        let result = self.controller.result();
        let page = self.controller.page();
        self.table.set_rows(row_views(result, page));
        self.table
            .set_sort(self.controller.sort().map(|s| (s.field, s.direction.arrow())));
        self.pager
            .update(result.total_count, result.total_pages, page);

        let empty = if self.controller.state() == LoadState::Failed {
            format!("Could not load {}", E::TITLE.to_lowercase())
        } else {
            format!("No {} found", E::TITLE.to_lowercase())
        };
        self.table.set_empty_message(empty);
    }

    fn open_confirm(&mut self, confirmation: Confirmation) {
        self.overlay = Overlay::Confirm(
            ConfirmDialog::new(confirmation.message, self.ctx.resolver.clone())
                .with_title(confirmation.title)
                .danger(confirmation.danger),
        );
    }

    fn open_prompt(&mut self, existing: Option<E>) {
        let Some(field) = E::editable_field() else {
            return;
        };
        let title = if existing.is_some() {
            format!("Edit {} {}", E::NOUN, field.label.to_lowercase())
        } else {
            format!("New {} {}", E::NOUN, field.label.to_lowercase())
        };
        let mut input = TextInput::new(title);
        if let Some(current) = existing
            .as_ref()
            .and_then(|item| item.field(field.key).as_search_text())
        {
            input.set_value(current);
        }
        self.overlay = Overlay::Prompt { input, existing };
    }

    fn open_jump(&mut self) {
        let total_pages = self.controller.result().total_pages;
        let input = TextInput::new(format!("Go to page (1-{total_pages})"))
            .with_placeholder(self.controller.page().number.to_string());
        self.overlay = Overlay::JumpToPage(input);
    }

    fn open_detail(&mut self, item: &E) {
        let text = serde_json::to_string_pretty(item).unwrap_or_else(|err| err.to_string());
        self.overlay = Overlay::Detail(TextViewer::new(
            format!("{} {}", E::NOUN, item.label()),
            &text,
            self.ctx.resolver.clone(),
        ));
    }

    fn open_receipt(&mut self, receipt: Receipt) {
        let viewer = TextViewer::new(
            format!("Receipt {}", receipt.number),
            &receipt.render_text(),
            self.ctx.resolver.clone(),
        )
        .with_copy()
        .with_save();
        self.overlay = Overlay::Receipt { viewer, receipt };
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) {
        let overlay = std::mem::replace(&mut self.overlay, Overlay::None);
        self.overlay = match overlay {
            Overlay::None => Overlay::None,
            Overlay::Confirm(mut dialog) => match dialog.handle_key(key).process() {
                (_, Some(ConfirmEvent::Confirmed)) => {
                    self.queue(ListMsg::Confirmed);
                    Overlay::None
                }
                (_, Some(ConfirmEvent::Cancelled)) => {
                    self.queue(ListMsg::Cancelled);
                    Overlay::None
                }
                (_, None) => Overlay::Confirm(dialog),
            },
            Overlay::Prompt {
                mut input,
                existing,
            } => match input.handle_key(key).process() {
                (_, Some(TextInputEvent::Submitted(value))) => {
                    self.queue(ListMsg::Submit { existing, value });
                    Overlay::None
                }
                (_, Some(TextInputEvent::Cancelled)) => Overlay::None,
                (_, None) => Overlay::Prompt { input, existing },
            },
            Overlay::JumpToPage(mut input) => match input.handle_key(key).process() {
                (_, Some(TextInputEvent::Submitted(value))) => match value.trim().parse::<usize>() {
                    Ok(number) => {
                        self.queue(ListMsg::ChangePage(number));
                        Overlay::None
                    }
                    Err(_) => Overlay::Alert(AlertDialog::new(
                        "Invalid page",
                        format!("'{}' is not a page number", value.trim()),
                        self.ctx.resolver.clone(),
                    )),
                },
                (_, Some(TextInputEvent::Cancelled)) => Overlay::None,
                (_, None) => Overlay::JumpToPage(input),
            },
            Overlay::Detail(mut viewer) => match viewer.handle_key(key).process() {
                (_, Some(TextViewerEvent::Closed)) => Overlay::None,
                _ => Overlay::Detail(viewer),
            },
            Overlay::Receipt {
                mut viewer,
                receipt,
            } => match viewer.handle_key(key).process() {
                (_, Some(TextViewerEvent::Closed)) => Overlay::None,
                (_, Some(TextViewerEvent::Copy)) => {
                    self.queue(ListMsg::CopyReceipt(receipt.clone()));
                    Overlay::Receipt { viewer, receipt }
                }
                (_, Some(TextViewerEvent::Save)) => {
                    self.queue(ListMsg::SaveReceipt(receipt.clone()));
                    Overlay::Receipt { viewer, receipt }
                }
                (_, None) => Overlay::Receipt { viewer, receipt },
            },
            Overlay::Alert(mut dialog) => match dialog.handle_key(key).process() {
                (_, Some(AlertEvent::Dismissed)) => Overlay::None,
                (_, None) => Overlay::Alert(dialog),
            },
        };
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> EventResult<()> {
        let page = self.controller.page();
        let total_pages = self.controller.result().total_pages;
        let r = &self.ctx.resolver;

        let msg = if r.matches_list(&key, ListAction::Filter) {
            self.filters.activate();
            return EventResult::Consumed;
        } else if r.matches_list(&key, ListAction::ResetFilters) {
            ListMsg::ResetFilters
        } else if r.matches_list(&key, ListAction::Reload) {
            ListMsg::Refresh
        } else if r.matches_list(&key, ListAction::NextPage) {
            ListMsg::ChangePage(page.number + 1)
        } else if r.matches_list(&key, ListAction::PrevPage) {
            ListMsg::ChangePage(page.number.saturating_sub(1))
        } else if r.matches_list(&key, ListAction::FirstPage) {
            ListMsg::ChangePage(1)
        } else if r.matches_list(&key, ListAction::LastPage) {
            ListMsg::ChangePage(total_pages)
        } else if r.matches_list(&key, ListAction::JumpToPage) {
            self.open_jump();
            return EventResult::Consumed;
        } else if r.matches_list(&key, ListAction::PageSize) {
            ListMsg::ChangePageSize(page.size.cycle_next())
        } else if r.matches_list(&key, ListAction::SortColumnNext) {
            self.table.focus_next_column();
            return EventResult::Consumed;
        } else if r.matches_list(&key, ListAction::SortColumnPrev) {
            self.table.focus_prev_column();
            return EventResult::Consumed;
        } else if r.matches_list(&key, ListAction::Sort) {
            match self.table.focused_sort_key() {
                Some(field) => ListMsg::SortBy(field),
                None => return EventResult::Consumed,
            }
        } else {
            return self.handle_row_key(key);
        };
        self.queue(msg);
        EventResult::Consumed
    }

    /// Actions on the selected record and creation.
    fn handle_row_key(&mut self, key: KeyEvent) -> EventResult<()> {
        let r = self.ctx.resolver.clone();
        let is_mutation = r.matches_list(&key, ListAction::New)
            || r.matches_list(&key, ListAction::Edit)
            || r.matches_list(&key, ListAction::Delete)
            || r.matches_list(&key, ListAction::ToggleStatus);
        if is_mutation && self.dispatcher.is_busy() {
            self.toast("Another change is still being saved", ToastType::Info);
            return EventResult::Consumed;
        }

        if r.matches_list(&key, ListAction::New) {
            if E::editable_field().is_none() {
                return EventResult::Ignored;
            }
            self.open_prompt(None);
            return EventResult::Consumed;
        }

        let Some(item) = self.selected().cloned() else {
            return EventResult::Ignored;
        };

        if r.matches_list(&key, ListAction::View) {
            self.open_detail(&item);
        } else if r.matches_list(&key, ListAction::Edit) {
            if E::editable_field().is_none() {
                return EventResult::Ignored;
            }
            self.open_prompt(Some(item));
        } else if r.matches_list(&key, ListAction::Delete) {
            self.queue(ListMsg::RequestDelete(item));
        } else if r.matches_list(&key, ListAction::ToggleStatus) {
            self.queue(ListMsg::RequestToggle(item));
        } else if r.matches_list(&key, ListAction::Receipt) {
            let Some(receipt) = item.receipt() else {
                return EventResult::Ignored;
            };
            self.open_receipt(receipt);
        } else {
            return EventResult::Ignored;
        }
        EventResult::Consumed
    }

    fn process_message(&mut self, msg: ListMsg<E>) -> PageMsg {
        match msg {
            ListMsg::Load => {
                let request = self.controller.load();
                self.fetch(request)
            }
            ListMsg::Refresh => {
                let request = self.controller.refresh();
                self.fetch(request)
            }
            ListMsg::ApplyFilters(criteria) => match self.controller.apply_filters(criteria) {
                Ok(request) => self.fetch(request),
                Err(err) => {
                    debug!(resource = E::RESOURCE, %err, "rejected filters");
                    self.alert("Invalid filter", err.to_string());
                    PageMsg::Idle
                }
            },
            ListMsg::ResetFilters => {
                self.filters.reset();
                let request = self.controller.reset_filters();
                self.fetch(request)
            }
            ListMsg::ChangePage(number) => {
                let request = self.controller.change_page(number);
                self.fetch_or_sync(request)
            }
            ListMsg::ChangePageSize(size) => {
                let request = self.controller.change_page_size(size);
                self.fetch_or_sync(request)
            }
            ListMsg::SortBy(field) => {
                self.controller.sort_by(field);
                self.sync_view();
                PageMsg::Idle
            }
            ListMsg::Loaded { seq, result } => match self.controller.on_loaded(seq, result) {
                LoadOutcome::Stale => PageMsg::Idle,
                LoadOutcome::Loaded => {
                    self.sync_view();
                    PageMsg::Idle
                }
                LoadOutcome::Failed(message) => {
                    self.sync_view();
                    self.toast(message, ToastType::Error);
                    PageMsg::Idle
                }
                LoadOutcome::Refetch(request) => self.fetch(request),
            },

            ListMsg::RequestDelete(item) => {
                let confirmation = self.dispatcher.request_delete(&item);
                self.open_confirm(confirmation);
                PageMsg::Idle
            }
            ListMsg::RequestToggle(item) => {
                if let Some(confirmation) = self.dispatcher.request_toggle(&item) {
                    self.open_confirm(confirmation);
                }
                PageMsg::Idle
            }
            ListMsg::Confirmed => self
                .dispatcher
                .confirm()
                .map_or(PageMsg::Idle, |mutation| self.mutate(mutation)),
            ListMsg::Cancelled => {
                self.dispatcher.cancel();
                PageMsg::Idle
            }
            ListMsg::Submit { existing, value } => self
                .dispatcher
                .submit(existing.as_ref(), &value)
                .map_or(PageMsg::Idle, |mutation| self.mutate(mutation)),
            ListMsg::Mutated { mutation, result } => {
                match self.dispatcher.on_complete::<E>(&mutation, result) {
                    DispatchOutcome::Refresh(message) => {
                        self.toast(message, ToastType::Success);
                        let request = self.controller.refresh();
                        self.fetch(request)
                    }
                    DispatchOutcome::Failed(message) => {
                        self.alert("Action failed", message);
                        PageMsg::Idle
                    }
                }
            }

            ListMsg::CopyReceipt(receipt) => CopyReceiptCmd::new(&receipt).into(),
            ListMsg::SaveReceipt(receipt) => SaveReceiptCmd::new(receipt).into(),
        }
    }
}

impl<E: Entity> Page for EntityPage<E> {
    fn init(&mut self) {
        self.queue(ListMsg::Load);
    }

    fn handle_tick(&mut self) {
        if self.controller.is_loading() {
            self.spinner.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult<()> {
        if !matches!(self.overlay, Overlay::None) {
            self.handle_overlay_key(key);
            return EventResult::Consumed;
        }

        // Filter, navigation and sort input waits for the fetch in flight.
        if self.controller.is_loading() {
            return EventResult::Ignored;
        }

        if self.filters.is_active() {
            if let (_, Some(FilterEvent::Apply(criteria))) = self.filters.handle_key(key).process() {
                self.queue(ListMsg::ApplyFilters(criteria));
            }
            return EventResult::Consumed;
        }

        match self.table.handle_key(key).process() {
            (_, Some(TableEvent::Activated(row))) => {
                if let Some(item) = self
                    .controller
                    .result()
                    .items
                    .iter()
                    .find(|item| item.id() == row.id)
                    .cloned()
                {
                    self.open_detail(&item);
                }
                return EventResult::Consumed;
            }
            (true, None) => return EventResult::Consumed,
            (false, None) => {}
        }

        self.handle_list_key(key)
    }

    fn update(&mut self) -> Result<PageMsg> {
        let mut commands: Vec<Box<dyn Command>> = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            match self.process_message(msg) {
                PageMsg::Idle => {}
                PageMsg::Run(cmds) => commands.extend(cmds),
                PageMsg::Close => return Ok(PageMsg::Close),
            }
        }
        Ok(if commands.is_empty() {
            PageMsg::Idle
        } else {
            PageMsg::Run(commands)
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [filters, body, pager] = Layout::vertical([
            Constraint::Length(FILTER_BAR_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(area);

        self.filters.render(frame, filters, theme);
        if self.controller.is_loading() {
            let block = Block::bordered()
                .title(format!(" {} ", E::TITLE))
                .border_style(Style::default().fg(theme.border()));
            let inner = block.inner(body);
            frame.render_widget(block, body);
            self.spinner.render(frame, inner, theme);
        } else {
            self.table.render(frame, body, theme);
        }
        self.pager.render(frame, pager, theme);

        match &mut self.overlay {
            Overlay::None => {}
            Overlay::Confirm(dialog) => dialog.render(frame, area, theme),
            Overlay::Prompt { input, .. } | Overlay::JumpToPage(input) => input.render(frame, area, theme),
            Overlay::Detail(viewer) | Overlay::Receipt { viewer, .. } => viewer.render(frame, area, theme),
            Overlay::Alert(dialog) => dialog.render(frame, area, theme),
        }
    }

    fn breadcrumbs(&self) -> Vec<String> {
        let mut crumbs = vec![E::TITLE.to_string()];
        if !self.controller.criteria().is_empty() {
            crumbs.push("filtered".to_string());
        }
        crumbs
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let r = self.resolver();
        if self.filters.is_active() {
            return vec![
                Keybinding::hint(
                    format!(
                        "{}/{}",
                        r.display_filter(FilterAction::NextField),
                        r.display_filter(FilterAction::PrevField)
                    ),
                    "Next/prev field",
                ),
                Keybinding::hint(r.display_filter(FilterAction::CycleChoice), "Cycle choice"),
                Keybinding::hint(r.display_filter(FilterAction::Apply), "Apply"),
                Keybinding::hint(r.display_filter(FilterAction::Close), "Close"),
            ];
        }

        let mut bindings = vec![
            Keybinding::hint(r.display_list(ListAction::Filter), "Filter"),
            Keybinding::new(r.display_list(ListAction::ResetFilters), "Reset filters"),
            Keybinding::hint(r.display_list(ListAction::Reload), "Reload"),
            Keybinding::hint(
                format!(
                    "{}/{}",
                    r.display_list(ListAction::PrevPage),
                    r.display_list(ListAction::NextPage)
                ),
                "Page",
            ),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_list(ListAction::FirstPage),
                    r.display_list(ListAction::LastPage)
                ),
                "First/last page",
            ),
            Keybinding::new(r.display_list(ListAction::JumpToPage), "Go to page"),
            Keybinding::new(r.display_list(ListAction::PageSize), "Page size"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    r.display_list(ListAction::SortColumnPrev),
                    r.display_list(ListAction::SortColumnNext)
                ),
                "Pick sort column",
            ),
            Keybinding::hint(r.display_list(ListAction::Sort), "Sort"),
            Keybinding::hint(r.display_list(ListAction::View), "View"),
            Keybinding::hint(r.display_list(ListAction::Delete), "Delete"),
        ];

        if let Some(field) = E::editable_field() {
            bindings.push(Keybinding::hint(r.display_list(ListAction::New), "New"));
            bindings.push(Keybinding::new(
                r.display_list(ListAction::Edit),
                format!("Edit {}", field.label.to_lowercase()),
            ));
        }
        let selected = self.selected();
        if selected.is_some_and(|item| item.status().is_some()) {
            bindings.push(Keybinding::hint(r.display_list(ListAction::ToggleStatus), "Toggle status"));
        }
        if selected.is_some_and(|item| item.receipt().is_some()) {
            bindings.push(Keybinding::hint(r.display_list(ListAction::Receipt), "Receipt"));
        }
        bindings
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use serde_json::json;

    use super::*;
    use crate::api::fake::{Call, FakeBackend};
    use crate::api::{ApiError, Backend};
    use crate::config::keybindings::KeybindingsConfig;
    use crate::entity::{Course, Faq};
    use crate::listing::criteria::FilterCriteria;
    use crate::listing::page::PageSize;

    struct Harness<E: Entity> {
        page: EntityPage<E>,
        backend: Arc<FakeBackend>,
        app_rx: UnboundedReceiver<AppMessage>,
        app_tx: UnboundedSender<AppMessage>,
    }

    impl<E: Entity> Harness<E> {
        fn new(backend: FakeBackend) -> Self {
            let backend = Arc::new(backend);
            let (app_tx, app_rx) = mpsc::unbounded_channel();
            let ctx = PageContext {
                backend: backend.clone() as Arc<dyn Backend>,
                resolver: Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default()))),
                app_tx: app_tx.clone(),
                page_size: PageSize::DEFAULT,
                lookup_limit: 100,
            };
            Self {
                page: EntityPage::new(ctx),
                backend,
                app_rx,
                app_tx,
            }
        }

        /// Run `update()` and every command it yields until the page is idle.
        async fn settle(&mut self) {
            loop {
                match self.page.update().unwrap() {
                    PageMsg::Run(commands) => {
                        for command in commands {
                            command.execute(self.app_tx.clone()).await.unwrap();
                        }
                    }
                    PageMsg::Idle | PageMsg::Close => return,
                }
            }
        }

        fn press(&mut self, code: KeyCode) -> EventResult<()> {
            self.page.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
        }

        fn toasts(&mut self) -> Vec<(String, ToastType)> {
            let mut toasts = Vec::new();
            while let Ok(msg) = self.app_rx.try_recv() {
                if let AppMessage::ShowToast { message, toast_type } = msg {
                    toasts.push((message, toast_type));
                }
            }
            toasts
        }
    }

    fn courses(n: usize) -> Vec<serde_json::Value> {
        (1..=n)
            .map(|i| json!({"_id": format!("c{i}"), "name": format!("Course {i}"), "status": "Y"}))
            .collect()
    }

    #[tokio::test]
    async fn test_init_loads_first_page() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(10), Some(62)));
        h.page.init();
        h.settle().await;

        assert_eq!(h.page.table.rows().len(), 10);
        assert_eq!(h.page.table.rows()[0].serial, 1);
        assert_eq!(h.page.controller.result().total_pages, 7);
        assert_eq!(h.backend.list_calls("course").len(), 1);
    }

    #[tokio::test]
    async fn test_delete_confirms_then_refreshes() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(3), Some(3)));
        h.page.init();
        h.settle().await;

        h.press(KeyCode::Char('d'));
        h.settle().await;
        assert!(matches!(h.page.overlay, Overlay::Confirm(_)));
        assert!(h.backend.calls().iter().all(|c| !matches!(c, Call::Delete { .. })));

        h.press(KeyCode::Char('y'));
        h.settle().await;

        assert!(h
            .backend
            .calls()
            .iter()
            .any(|c| matches!(c, Call::Delete { id, .. } if id == "c1")));
        assert_eq!(h.backend.list_calls("course").len(), 2);
        assert!(matches!(h.page.overlay, Overlay::None));
        assert!(h.toasts().iter().any(|(_, t)| *t == ToastType::Success));
    }

    #[tokio::test]
    async fn test_cancelled_delete_sends_nothing() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(3), Some(3)));
        h.page.init();
        h.settle().await;

        h.press(KeyCode::Char('d'));
        h.settle().await;
        h.press(KeyCode::Char('n'));
        h.settle().await;

        assert!(h.backend.calls().iter().all(|c| !matches!(c, Call::Delete { .. })));
        assert!(h.page.dispatcher.pending().is_none());
    }

    #[tokio::test]
    async fn test_failed_mutation_shows_backend_message() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(3), Some(3)));
        h.page.init();
        h.settle().await;

        h.backend.fail_next(ApiError::Conflict("Course has enrolled students".to_string()));
        h.press(KeyCode::Char('d'));
        h.settle().await;
        h.press(KeyCode::Char('y'));
        h.settle().await;

        let Overlay::Alert(dialog) = &h.page.overlay else {
            panic!("expected an alert");
        };
        assert_eq!(dialog.message(), "Course has enrolled students");
        assert_eq!(h.backend.list_calls("course").len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_date_blocks_fetch() {
        let mut h = Harness::<Faq>::new(FakeBackend::new().with_list("faq", vec![], None));
        h.page.init();
        h.settle().await;

        let criteria = FilterCriteria::new().with("fromDate", "31/12/2025");
        h.page.queue(ListMsg::ApplyFilters(criteria));
        h.settle().await;

        let Overlay::Alert(dialog) = &h.page.overlay else {
            panic!("expected an alert");
        };
        assert!(dialog.message().contains("31/12/2025"));
        assert_eq!(h.backend.list_calls("faq").len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_shows_error_toast() {
        let mut h = Harness::<Course>::new(
            FakeBackend::new().with_list_error("course", ApiError::Timeout),
        );
        h.page.init();
        h.settle().await;

        assert!(h.page.table.rows().is_empty());
        let toasts = h.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].1, ToastType::Error);
    }

    #[tokio::test]
    async fn test_local_paging_does_not_refetch() {
        let faqs: Vec<_> = (1..=23)
            .map(|i| json!({"_id": format!("f{i}"), "question": format!("Q{i}"), "answer": "A"}))
            .collect();
        let mut h = Harness::<Faq>::new(FakeBackend::new().with_list("faq", faqs, None));
        h.page.init();
        h.settle().await;

        h.press(KeyCode::Char('l'));
        h.settle().await;
        h.press(KeyCode::Char('>'));
        h.settle().await;

        assert_eq!(h.page.controller.page().number, 3);
        assert_eq!(h.page.table.rows().len(), 3);
        assert_eq!(h.page.table.rows()[0].serial, 21);
        assert_eq!(h.backend.list_calls("faq").len(), 1);
    }

    #[tokio::test]
    async fn test_jump_to_page_fetches_once() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(10), Some(62)));
        h.page.init();
        h.settle().await;

        h.press(KeyCode::Char(':'));
        assert!(matches!(h.page.overlay, Overlay::JumpToPage(_)));
        h.press(KeyCode::Char('4'));
        h.press(KeyCode::Enter);
        h.settle().await;

        assert!(matches!(h.page.overlay, Overlay::None));
        assert_eq!(h.page.controller.page().number, 4);
        let calls = h.backend.list_calls("course");
        assert_eq!(calls.len(), 2);
        assert!(calls[1].contains(&("page".to_string(), "4".to_string())));
    }

    #[tokio::test]
    async fn test_jump_to_page_rejects_non_numbers() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(10), Some(62)));
        h.page.init();
        h.settle().await;

        h.press(KeyCode::Char(':'));
        h.press(KeyCode::Char('x'));
        h.press(KeyCode::Enter);
        h.settle().await;

        assert!(matches!(h.page.overlay, Overlay::Alert(_)));
        assert_eq!(h.page.controller.page().number, 1);
        assert_eq!(h.backend.list_calls("course").len(), 1);
    }

    #[tokio::test]
    async fn test_keys_ignored_while_loading() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(3), Some(3)));
        h.page.init();
        let _ = h.page.update().unwrap();
        assert!(h.page.controller.is_loading());
        assert!(matches!(h.press(KeyCode::Char('/')), EventResult::Ignored));
        assert!(!h.page.filters.is_active());
    }

    #[tokio::test]
    async fn test_edit_prefills_and_updates() {
        let mut h = Harness::<Course>::new(FakeBackend::new().with_list("course", courses(2), Some(2)));
        h.page.init();
        h.settle().await;

        h.press(KeyCode::Char('e'));
        let Overlay::Prompt { input, .. } = &h.page.overlay else {
            panic!("expected a prompt");
        };
        assert_eq!(input.value(), "Course 1");

        h.press(KeyCode::Char('!'));
        h.press(KeyCode::Enter);
        h.settle().await;

        assert!(h.backend.calls().iter().any(|c| matches!(
            c,
            Call::Update { id, body, .. } if id == "c1" && body == &json!({"name": "Course 1!"})
        )));
    }
}
