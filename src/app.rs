use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::{Constraint, Layout, Rect};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::Theme;
use crate::commands::Command;
use crate::config::{self, GlobalAction, KeyResolver};
use crate::page::{Page, PageContext, PageMsg};
use crate::registry::{PageRegistry, PageSelector};
use crate::theme::next_theme;
use crate::tui::{Event, Tui};
use crate::ui::{
    Component, EventResultExt, HelpEvent, HelpOverlay, KeybindingSection,
    STATUS_BAR_HEIGHT, StatusBar, Toast, ToastManager, ToastType,
};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 8.0;

/// Application-level messages. Page-specific messages stay on each page's
/// own channel.
#[derive(Debug, Clone)]
pub enum AppMessage {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    ClearScreen,

    ShowToast {
        message: String,
        toast_type: ToastType,
    },
    DisplayHelp,
    CycleTheme,

    /// A spawned command finished; the active page should drain its queue.
    CommandCompleted { name: String, success: bool },

    /// Open the page registered under this key.
    OpenPage(&'static str),
    /// Return to the page selector.
    GoBack,
}

enum Route {
    Selector(PageSelector),
    Page(Box<dyn Page>),
}

pub struct App {
    route: Route,
    registry: PageRegistry,
    ctx: PageContext,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    status_bar: StatusBar,
    toasts: ToastManager,
    help: Option<HelpOverlay>,
    should_quit: bool,
    should_suspend: bool,
    msg_tx: UnboundedSender<AppMessage>,
    msg_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(
        registry: PageRegistry,
        ctx_builder: impl FnOnce(UnboundedSender<AppMessage>) -> PageContext,
        api_host: &str,
        theme: Theme,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let ctx = ctx_builder(msg_tx.clone());
        let resolver = ctx.resolver.clone();

        Self {
            route: Route::Selector(PageSelector::new(&registry, resolver.clone())),
            status_bar: StatusBar::new(api_host, resolver.clone()),
            registry,
            ctx,
            resolver,
            theme,
            toasts: ToastManager::new(),
            help: None,
            should_quit: false,
            should_suspend: false,
            msg_tx,
            msg_rx,
        }
    }

    /// Open a page directly instead of starting on the selector.
    pub fn open_initial_page(&mut self, key: &str) -> Result<()> {
        let Some(entry) = self.registry.get(key) else {
            let known = self.registry.keys().join(", ");
            return Err(color_eyre::eyre::eyre!("Unknown page '{key}'. Available: {known}"));
        };
        self.msg_tx.send(AppMessage::OpenPage(entry.key))?;
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_messages(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                self.msg_tx.send(AppMessage::Resume)?;
                self.msg_tx.send(AppMessage::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> Result<()> {
        let Some(event) = tui.next_event().await else {
            return Ok(());
        };

        match event {
            Event::Quit => self.msg_tx.send(AppMessage::Quit)?,
            Event::Suspend => self.msg_tx.send(AppMessage::Suspend)?,
            Event::Tick => self.msg_tx.send(AppMessage::Tick)?,
            Event::Render => self.msg_tx.send(AppMessage::Render)?,
            Event::Resize(width, height) => self.msg_tx.send(AppMessage::Resize(width, height))?,
            Event::Key(key) => self.handle_key(key)?,
            Event::Error(message) => self.msg_tx.send(AppMessage::ShowToast {
                message,
                toast_type: ToastType::Error,
            })?,
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if let Some(help) = &mut self.help {
            if let (_, Some(HelpEvent::Close)) = help.handle_key(key).process() {
                self.help = None;
            }
            return Ok(());
        }

        let consumed = match &mut self.route {
            Route::Selector(selector) => match selector.handle_key(key).process() {
                (_, Some(page_key)) => {
                    self.msg_tx.send(AppMessage::OpenPage(page_key))?;
                    true
                }
                (consumed, None) => consumed,
            },
            Route::Page(page) => page.handle_key(key).is_consumed(),
        };

        if consumed {
            self.update_page();
            return Ok(());
        }
        self.handle_global_key(key)
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Result<()> {
        let msg = if self.resolver.matches_global(&key, GlobalAction::Quit) {
            AppMessage::Quit
        } else if self.resolver.matches_global(&key, GlobalAction::Help) {
            AppMessage::DisplayHelp
        } else if self.resolver.matches_global(&key, GlobalAction::Theme) {
            AppMessage::CycleTheme
        } else if self.resolver.matches_global(&key, GlobalAction::Back)
            && matches!(self.route, Route::Page(_))
        {
            AppMessage::GoBack
        } else {
            return Ok(());
        };
        self.msg_tx.send(msg)?;
        Ok(())
    }

    fn handle_messages(&mut self, tui: &mut Tui) -> Result<()> {
        while let Ok(msg) = self.msg_rx.try_recv() {
            if !matches!(msg, AppMessage::Tick | AppMessage::Render) {
                debug!(?msg, "handling message");
            }

            match msg {
                AppMessage::Tick => {
                    if let Route::Page(page) = &mut self.route {
                        page.handle_tick();
                    }
                    self.toasts.handle_tick();
                }
                AppMessage::Render => self.render(tui)?,
                AppMessage::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    self.render(tui)?;
                }
                AppMessage::Suspend => self.should_suspend = true,
                AppMessage::Resume => self.should_suspend = false,
                AppMessage::Quit => self.should_quit = true,
                AppMessage::ClearScreen => tui.clear()?,
                AppMessage::ShowToast {
                    message,
                    toast_type,
                } => self.toasts.show(Toast::new(message, toast_type)),
                AppMessage::DisplayHelp => self.show_help(),
                AppMessage::CycleTheme => self.cycle_theme(),
                AppMessage::CommandCompleted { name, success } => {
                    debug!(%name, success, "command completed");
                    self.update_page();
                }
                AppMessage::OpenPage(key) => self.open_page(key),
                AppMessage::GoBack => {
                    self.route =
                        Route::Selector(PageSelector::new(&self.registry, self.resolver.clone()));
                }
            }
        }
        Ok(())
    }

    fn open_page(&mut self, key: &str) {
        let Some(entry) = self.registry.get(key) else {
            warn!(key, "no page registered");
            return;
        };
        info!(key, "opening page");
        let mut page = entry.create(&self.ctx);
        page.init();
        self.route = Route::Page(page);
        self.update_page();
    }

    /// Drain the active page's queue and spawn whatever it asks for.
    fn update_page(&mut self) {
        let Route::Page(page) = &mut self.route else {
            return;
        };
        match page.update() {
            Ok(PageMsg::Idle) => {}
            Ok(PageMsg::Run(commands)) => {
                for command in commands {
                    self.spawn_command(command);
                }
            }
            Ok(PageMsg::Close) => {
                let _ = self.msg_tx.send(AppMessage::GoBack);
            }
            Err(err) => {
                error!(%err, "page update failed");
                self.toasts
                    .show(Toast::new(format!("Error: {err}"), ToastType::Error));
            }
        }
    }

    fn spawn_command(&self, command: Box<dyn Command>) {
        let tx = self.msg_tx.clone();
        let name = command.name();
        debug!(%name, "spawning command");

        tokio::spawn(async move {
            let result = command.execute(tx.clone()).await;
            let success = result.is_ok();
            if let Err(err) = result {
                error!(%name, %err, "command failed");
                let _ = tx.send(AppMessage::ShowToast {
                    message: format!("{name} failed: {err}"),
                    toast_type: ToastType::Error,
                });
            }
            let _ = tx.send(AppMessage::CommandCompleted { name, success });
        });
    }

    fn show_help(&mut self) {
        let mut sections = Vec::new();
        if let Route::Page(page) = &self.route {
            let title = page.breadcrumbs().first().cloned().unwrap_or_default();
            sections.push(KeybindingSection::new(title, page.keybindings()));
        }
        sections.push(KeybindingSection::new(
            "Global",
            self.status_bar.global_keybindings(),
        ));
        self.help = Some(HelpOverlay::new(sections, self.resolver.clone()));
    }

    fn cycle_theme(&mut self) {
        let next = next_theme(&self.theme);
        self.theme = next.theme;
        if let Err(err) = config::save_theme(next.name) {
            warn!(%err, "could not persist theme");
        }
        self.toasts
            .show(Toast::new(format!("Theme: {next}"), ToastType::Info));
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| {
            let [header, body] = Layout::vertical([
                Constraint::Length(STATUS_BAR_HEIGHT + 2),
                Constraint::Min(0),
            ])
            .areas(frame.area());

            let (breadcrumbs, keybindings) = match &self.route {
                Route::Selector(_) => (vec!["Pages".to_string()], Vec::new()),
                Route::Page(page) => (page.breadcrumbs(), page.keybindings()),
            };
            self.status_bar
                .render_with_keybindings(frame, header, &self.theme, &breadcrumbs, &keybindings);

            match &mut self.route {
                Route::Selector(selector) => selector.render(frame, body, &self.theme),
                Route::Page(page) => page.render(frame, body, &self.theme),
            }

            if let Some(help) = &mut self.help {
                help.render(frame, frame.area(), &self.theme);
            }
            self.toasts.render(frame, frame.area(), &self.theme);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::api::Backend;
    use crate::api::fake::FakeBackend;
    use crate::config::keybindings::KeybindingsConfig;
    use crate::entity::register_all;
    use crate::listing::PageSize;

    fn app() -> App {
        let mut registry = PageRegistry::new();
        register_all(&mut registry);
        let resolver = Arc::new(KeyResolver::new(Arc::new(KeybindingsConfig::default())));
        App::new(
            registry,
            |app_tx| PageContext {
                backend: Arc::new(FakeBackend::new()) as Arc<dyn Backend>,
                resolver,
                app_tx,
                page_size: PageSize::DEFAULT,
                lookup_limit: 100,
            },
            "localhost",
            Theme::default(),
        )
    }

    fn drain(app: &mut App) -> Vec<AppMessage> {
        let mut msgs = Vec::new();
        while let Ok(msg) = app.msg_rx.try_recv() {
            msgs.push(msg);
        }
        msgs
    }

    #[tokio::test]
    async fn test_unknown_initial_page_is_an_error() {
        let mut app = app();
        let err = app.open_initial_page("grades").unwrap_err();
        assert!(err.to_string().contains("users"));
        assert!(app.open_initial_page("faqs").is_ok());
        assert!(matches!(drain(&mut app).as_slice(), [AppMessage::OpenPage("faqs")]));
    }

    #[tokio::test]
    async fn test_open_page_then_back() {
        let mut app = app();
        app.open_page("courses");
        let Route::Page(page) = &app.route else {
            panic!("expected a page");
        };
        assert_eq!(page.breadcrumbs(), vec!["Courses".to_string()]);

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(drain(&mut app).as_slice(), [AppMessage::GoBack]));
    }

    #[tokio::test]
    async fn test_help_swallows_keys_until_closed() {
        let mut app = app();
        app.show_help();
        app.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::NONE))
            .unwrap();
        assert!(app.help.is_some());
        assert!(drain(&mut app).is_empty());

        app.handle_key(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE))
            .unwrap();
        assert!(app.help.is_none());
    }
}
