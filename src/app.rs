//! The hosting environment.
//!
//! [`App`] owns the session's [`ViewManager`], mounts the current page and
//! whichever dialog the modal host has open, routes keys, and renders.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::Theme;
use crate::config::{AppConfig, DialogAction, GlobalAction, KeyResolver};
use crate::dialogs;
use crate::message::AppMessage;
use crate::modal::{DialogRegistry, DialogView, ModalFrame, ModalId};
use crate::navigation::{Navigator, Route};
use crate::pages;
use crate::tui::{Event, Tui};
use crate::ui::{Component, StatusBar, StatusInfo, Toast, ToastManager};
use crate::view::{Page, ViewContext, ViewManager};
use crate::weather::WeatherForecastService;

const STATUS_BAR_HEIGHT: u16 = 5;

/// A dialog instance mounted for one show-operation.
struct MountedDialog {
    id: ModalId,
    view: Box<dyn DialogView>,
}

pub struct App {
    config: Arc<AppConfig>,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    manager: ViewManager,
    registry: DialogRegistry,
    navigator: Navigator,
    page: Box<dyn Page>,
    dialog: Option<MountedDialog>,
    weather: Arc<dyn WeatherForecastService>,
    status_bar: StatusBar,
    toasts: ToastManager,
    should_quit: bool,
    should_suspend: bool,
    message_tx: UnboundedSender<AppMessage>,
    message_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(
        config: Arc<AppConfig>,
        resolver: Arc<KeyResolver>,
        theme: Theme,
        weather: Arc<dyn WeatherForecastService>,
        start: Route,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        let manager = ViewManager::new();

        let mut registry = DialogRegistry::new();
        dialogs::register_all(&mut registry, weather.clone());
        debug!(kinds = ?registry.kinds(), "registered dialogs");

        let page = pages::create_page(
            start,
            ViewContext::new(&manager, resolver.clone()),
            message_tx.clone(),
            &weather,
        );

        Self {
            config,
            status_bar: StatusBar::new(resolver.clone()),
            resolver,
            theme,
            navigator: Navigator::new(start, manager.clone()),
            manager,
            registry,
            page,
            dialog: None,
            weather,
            toasts: ToastManager::new(),
            should_quit: false,
            should_suspend: false,
            message_tx,
            message_rx,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new(self.config.ui.frame_rate, self.config.ui.tick_rate)?;
        tui.enter()?;

        loop {
            self.handle_events(&mut tui).await?;
            self.handle_messages(&mut tui)?;
            if self.should_suspend {
                tui.suspend()?;
                self.message_tx.send(AppMessage::Resume)?;
                self.message_tx.send(AppMessage::ClearScreen)?;
                tui.enter()?;
            } else if self.should_quit {
                break;
            }
        }

        tui.exit()?;
        info!("Stopping lazyview");
        Ok(())
    }

    async fn handle_events(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        let Some(event) = tui.next_event().await else {
            self.should_quit = true;
            return Ok(());
        };

        match event {
            Event::Init => {}
            Event::Quit => self.message_tx.send(AppMessage::Quit)?,
            Event::Tick => self.message_tx.send(AppMessage::Tick)?,
            Event::Render => self.message_tx.send(AppMessage::Render)?,
            Event::Resize(width, height) => {
                self.message_tx.send(AppMessage::Resize(width, height))?;
            }
            Event::Key(key) => self.handle_key(key)?,
            Event::Error(error) => {
                warn!(%error, "terminal event error");
                self.toasts.show(Toast::error(error));
            }
        }
        Ok(())
    }

    fn handle_messages(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        while let Ok(message) = self.message_rx.try_recv() {
            match message {
                AppMessage::Render => {
                    tui.draw(|frame| self.render(frame))?;
                }
                AppMessage::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    tui.draw(|frame| self.render(frame))?;
                }
                AppMessage::ClearScreen => tui.clear()?,
                message => self.update(message),
            }
        }
        Ok(())
    }

    /// Apply a message that does not need the terminal.
    fn update(&mut self, message: AppMessage) {
        if !matches!(message, AppMessage::Tick) {
            debug!(?message, "handling message");
        }
        match message {
            AppMessage::Tick => self.tick(),
            AppMessage::Quit => self.should_quit = true,
            AppMessage::Suspend => self.should_suspend = true,
            AppMessage::Resume => self.should_suspend = false,
            AppMessage::Notify(toast) => self.toasts.show(toast),
            AppMessage::Render | AppMessage::Resize(..) | AppMessage::ClearScreen => {}
        }
    }

    fn tick(&mut self) {
        self.sync_dialog();
        self.page.handle_tick();
        if let Some(dialog) = &mut self.dialog {
            dialog.view.handle_tick();
        }
        self.toasts.handle_tick();
    }

    /// Mount or drop the dialog instance so it matches the host.
    fn sync_dialog(&mut self) {
        let open_id = self.manager.host().current_id();
        if open_id == self.dialog.as_ref().map(|dialog| dialog.id) {
            return;
        }
        if let Some(dialog) = self.dialog.take() {
            debug!(id = %dialog.id, "unmounting dialog");
        }
        let Some(id) = open_id else {
            return;
        };

        match self.registry.mount_open(&self.manager, self.resolver.clone()) {
            Ok(Some(view)) => {
                debug!(%id, view = %view.id(), "mounted dialog");
                self.dialog = Some(MountedDialog { id, view });
            }
            Ok(None) => {}
            Err(mount_error) => {
                error!(%id, error = %mount_error, "cannot mount dialog");
                self.toasts.show(Toast::error(mount_error.to_string()));
                // The awaiting caller resumes with Cancel.
                if let Err(error) = self.manager.host().dismiss() {
                    warn!(%error, "failed to dismiss unmountable dialog");
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> color_eyre::Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('z') {
            self.message_tx.send(AppMessage::Suspend)?;
            return Ok(());
        }

        self.sync_dialog();
        if let Some(dialog) = &mut self.dialog {
            let closable = self
                .manager
                .host()
                .options()
                .is_some_and(|options| options.show_close_button);
            if closable && self.resolver.matches_dialog(&key, DialogAction::Close) {
                if let Err(error) = self.manager.host().dismiss() {
                    warn!(%error, "failed to dismiss dialog");
                }
            } else if let Err(error) = dialog.view.handle_key(key) {
                error!(%error, "dialog failed to handle key");
                self.toasts.show(Toast::error(error.to_string()));
            }
            self.sync_dialog();
            return Ok(());
        }

        if self.handle_global_key(&key) {
            return Ok(());
        }

        match self.page.handle_key(key) {
            Ok(result) if !result.is_consumed() => {
                debug!(key = ?key.code, page = self.page.title(), "unhandled key");
            }
            Ok(_) => {}
            Err(error) => {
                error!(%error, page = self.page.title(), "page failed to handle key");
                self.toasts.show(Toast::error(error.to_string()));
            }
        }
        self.sync_dialog();
        Ok(())
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        if self.resolver.matches_global(key, GlobalAction::Quit) {
            if self.manager.is_locked() {
                warn!("quit refused: view is locked");
                self.toasts
                    .show(Toast::warning("The view is locked; unlock it before quitting"));
            } else {
                self.should_quit = true;
            }
            return true;
        }
        if self.resolver.matches_global(key, GlobalAction::ToggleLock) {
            if self.manager.is_locked() {
                self.manager.unlock_view();
            } else {
                self.manager.lock_view();
            }
            return true;
        }

        let route = [
            (GlobalAction::Index, Route::Index),
            (GlobalAction::Counter, Route::Counter),
            (GlobalAction::FetchData, Route::FetchData),
        ]
        .into_iter()
        .find(|(action, _)| self.resolver.matches_global(key, *action))
        .map(|(_, route)| route);

        if let Some(route) = route {
            self.navigate(route);
            return true;
        }
        false
    }

    fn navigate(&mut self, route: Route) {
        let previous = self.navigator.current();
        match self.navigator.navigate_to(route) {
            Ok(route) if route != previous => {
                self.page = pages::create_page(
                    route,
                    ViewContext::new(&self.manager, self.resolver.clone()),
                    self.message_tx.clone(),
                    &self.weather,
                );
            }
            Ok(_) => {}
            Err(error) => self.toasts.show(Toast::warning(error.to_string())),
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.base())),
            area,
        );

        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(STATUS_BAR_HEIGHT)])
                .areas(area);

        self.page.render(frame, main_area, &self.theme);

        let snapshot = self.manager.host().snapshot();
        let keybindings = match &self.dialog {
            Some(dialog) => dialog.view.keybindings(),
            None => self.page.keybindings(),
        };
        let info = StatusInfo {
            page_title: self.page.title(),
            locked: self.manager.is_locked(),
            dialog_title: snapshot.as_ref().map(|s| {
                if s.options.title.is_empty() {
                    self.registry.get(s.kind).map_or_else(
                        || s.kind.to_string(),
                        |provider| provider.display_name().to_string(),
                    )
                } else {
                    s.options.title.clone()
                }
            }),
        };
        self.status_bar
            .render(frame, status_area, &self.theme, &info, &keybindings);

        if let (Some(dialog), Some(snapshot)) = (&mut self.dialog, snapshot)
            && dialog.id == snapshot.id
        {
            let mut chrome = ModalFrame::new(&snapshot.options);
            if snapshot.options.show_close_button {
                chrome = chrome.with_close_hint(self.resolver.display_dialog(DialogAction::Close));
            }
            let body = chrome.render(frame, main_area, &self.theme);
            dialog.view.render(frame, body, &self.theme);
        }

        self.toasts.render(frame, area, &self.theme);
    }
}
