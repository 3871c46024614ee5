use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::Theme;
use crate::config::{GlobalAction, IndexAction};
use crate::dialogs::{CounterDialog, FetchDataDialog, MESSAGE_PARAM, YesNoDialog};
use crate::message::AppMessage;
use crate::modal::{
    Dialog, MODAL_BODY_CSS_PARAM, MODAL_CSS_PARAM, ModalOptions, ModalResult, ModalResultType,
};
use crate::ui::{EventResult, Keybinding, Result, Toast, ToastType};
use crate::view::{Page, View, ViewContext};

/// Landing page: shows the lock state and opens the sample dialogs.
pub struct IndexPage {
    ctx: ViewContext,
    messages: UnboundedSender<AppMessage>,
}

impl IndexPage {
    pub const fn new(ctx: ViewContext, messages: UnboundedSender<AppMessage>) -> Self {
        Self { ctx, messages }
    }

    fn exit_confirm_options() -> ModalOptions {
        ModalOptions::new()
            .with_title("Exit Confirm")
            .with_header()
            .with_parameter(MESSAGE_PARAM, "Try navigating to another site.")
    }

    fn large_dialog_options(title: &str) -> ModalOptions {
        ModalOptions::new()
            .with_title(title)
            .with_header()
            .with_close_button()
            .with_parameter(MODAL_BODY_CSS_PARAM, "p-0")
            .with_parameter(MODAL_CSS_PARAM, "modal-xl")
    }

    /// Show `D` with the view locked, wait for it in the background, then
    /// unlock and report the outcome as a toast.
    ///
    /// A rejected show leaves the lock alone: it belongs to the dialog that
    /// is already open.
    fn open_locked<D: Dialog>(&self, options: ModalOptions) {
        let title = options.title.clone();
        let pending = match self.manager().show_modal_async::<D>(options) {
            Ok(pending) => pending,
            Err(error) => {
                warn!(view = %self.id(), kind = %D::KIND, %error, "dialog request rejected");
                // The app may have quit already.
                let _ = self.messages.send(AppMessage::Notify(Toast::error(error.to_string())));
                return;
            }
        };
        let lock = self.manager().lock_scope();
        debug!(view = %self.id(), modal = %pending.id(), kind = %D::KIND, "dialog opened with view locked");

        let messages = self.messages.clone();
        tokio::spawn(async move {
            let result = pending.await;
            drop(lock);
            let _ = messages.send(AppMessage::Notify(result_toast(&title, &result)));
        });
    }
}

fn result_toast(title: &str, result: &ModalResult) -> Toast {
    let message = match &result.data {
        Some(data) if data.is_array() => format!(
            "{title}: {} ({} rows)",
            result.result_type,
            data.as_array().map_or(0, Vec::len)
        ),
        Some(data) => format!("{title}: {} ({data})", result.result_type),
        None => format!("{title}: {}", result.result_type),
    };
    let toast_type = match result.result_type {
        ModalResultType::Ok => ToastType::Success,
        ModalResultType::Exit => ToastType::Warning,
        ModalResultType::Cancel | ModalResultType::Unset => ToastType::Info,
    };
    Toast::new(message, toast_type)
}

impl View for IndexPage {
    fn context(&self) -> &ViewContext {
        &self.ctx
    }
}

impl Page for IndexPage {
    fn title(&self) -> &'static str {
        "Home"
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        let resolver = self.ctx.resolver().clone();
        if resolver.matches_index(&key, IndexAction::ExitConfirm) {
            self.open_locked::<YesNoDialog>(Self::exit_confirm_options());
        } else if resolver.matches_index(&key, IndexAction::FetchDataDialog) {
            self.open_locked::<FetchDataDialog>(Self::large_dialog_options("Fetch Data in a Dialog"));
        } else if resolver.matches_index(&key, IndexAction::CounterDialog) {
            self.open_locked::<CounterDialog>(Self::large_dialog_options("Counter in a Dialog"));
        } else {
            return Ok(EventResult::Ignored);
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let resolver = self.ctx.resolver();
        let locked = self.manager().is_locked();
        let key_style = Style::default().fg(theme.peach());
        let hint_style = Style::default().fg(theme.subtext1());
        let hint = |key: String, text: &'static str| {
            Line::from(vec![
                Span::styled(format!("{key:>5}"), key_style),
                Span::styled(format!("  {text}"), hint_style),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                "Hello, world!",
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("The view is ", Style::default().fg(theme.text())),
                Span::styled(
                    if locked { "Locked" } else { "Unlocked" },
                    Style::default()
                        .fg(theme.lock_state(locked))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            hint(
                resolver.display_global(GlobalAction::ToggleLock),
                if locked { "Unlock" } else { "Lock" },
            ),
            hint(resolver.display_index(IndexAction::ExitConfirm), "Exit confirm"),
            hint(
                resolver.display_index(IndexAction::FetchDataDialog),
                "Fetch data in a dialog",
            ),
            hint(
                resolver.display_index(IndexAction::CounterDialog),
                "Counter in a dialog",
            ),
        ];

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let area = area.centered(Constraint::Length(40), Constraint::Length(height));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), area);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let resolver = self.ctx.resolver();
        vec![
            Keybinding::new(resolver.display_index(IndexAction::ExitConfirm), "Exit confirm"),
            Keybinding::new(resolver.display_index(IndexAction::FetchDataDialog), "Fetch data"),
            Keybinding::new(resolver.display_index(IndexAction::CounterDialog), "Counter"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use crossterm::event::KeyCode;
    use serde_json::json;
    use tokio::sync::mpsc;

    use super::*;
    use crate::config::KeyResolver;
    use crate::view::ViewManager;

    async fn wait_for_open(manager: &ViewManager) {
        for _ in 0..100 {
            if manager.host().is_open() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        panic!("dialog never opened");
    }

    #[tokio::test]
    async fn test_exit_confirm_locks_until_answered() {
        let manager = ViewManager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = IndexPage::new(ViewContext::new(&manager, Arc::new(KeyResolver::default())), tx);

        page.handle_key(KeyEvent::from(KeyCode::Char('e'))).unwrap();
        wait_for_open(&manager).await;

        assert!(manager.is_locked());
        assert_eq!(manager.host().snapshot().map(|open| open.kind), Some(YesNoDialog::KIND));
        let options = manager.host().options().unwrap();
        assert_eq!(options.title, "Exit Confirm");
        assert!(!options.hide_header);
        assert_eq!(
            options.get_parameter_as_string(MESSAGE_PARAM),
            "Try navigating to another site."
        );

        manager.host().close(ModalResult::exit(None)).unwrap();

        let Some(AppMessage::Notify(toast)) = rx.recv().await else {
            panic!("expected a toast");
        };
        assert_eq!(toast.message(), "Exit Confirm: Exit");
        assert!(!manager.is_locked());
    }

    #[tokio::test]
    async fn test_counter_dialog_reports_count() {
        let manager = ViewManager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = IndexPage::new(ViewContext::new(&manager, Arc::new(KeyResolver::default())), tx);

        page.handle_key(KeyEvent::from(KeyCode::Char('c'))).unwrap();
        wait_for_open(&manager).await;

        let options = manager.host().options().unwrap();
        assert!(options.show_close_button);
        assert_eq!(options.effective_css_class(), "modal-xl");
        assert_eq!(options.effective_body_css_class(), "p-0");

        manager.host().close(ModalResult::ok(Some(json!(4)))).unwrap();

        let Some(AppMessage::Notify(toast)) = rx.recv().await else {
            panic!("expected a toast");
        };
        assert_eq!(toast.toast_type(), ToastType::Success);
        assert_eq!(toast.message(), "Counter in a Dialog: OK (4)");
        assert!(!manager.is_locked());
    }

    #[tokio::test]
    async fn test_dismissed_dialog_unlocks() {
        let manager = ViewManager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = IndexPage::new(ViewContext::new(&manager, Arc::new(KeyResolver::default())), tx);

        page.handle_key(KeyEvent::from(KeyCode::Char('f'))).unwrap();
        wait_for_open(&manager).await;
        manager.host().dismiss().unwrap();

        let Some(AppMessage::Notify(toast)) = rx.recv().await else {
            panic!("expected a toast");
        };
        assert_eq!(toast.toast_type(), ToastType::Info);
        assert!(!manager.is_locked());
    }

    #[tokio::test]
    async fn test_rejected_request_keeps_open_dialog_locked() {
        let manager = ViewManager::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut page = IndexPage::new(ViewContext::new(&manager, Arc::new(KeyResolver::default())), tx);

        page.handle_key(KeyEvent::from(KeyCode::Char('e'))).unwrap();
        page.handle_key(KeyEvent::from(KeyCode::Char('c'))).unwrap();

        let Some(AppMessage::Notify(toast)) = rx.recv().await else {
            panic!("expected a toast");
        };
        assert_eq!(toast.toast_type(), ToastType::Error);
        assert!(toast.message().contains("already open"));
        assert_eq!(manager.host().snapshot().map(|open| open.kind), Some(YesNoDialog::KIND));
        assert!(manager.is_locked());

        manager.host().close(ModalResult::cancel()).unwrap();
        let Some(AppMessage::Notify(toast)) = rx.recv().await else {
            panic!("expected a toast");
        };
        assert_eq!(toast.message(), "Exit Confirm: Cancel");
        assert!(!manager.is_locked());
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let manager = ViewManager::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut page = IndexPage::new(ViewContext::new(&manager, Arc::new(KeyResolver::default())), tx);

        let result = page.handle_key(KeyEvent::from(KeyCode::Char('z'))).unwrap();
        assert_eq!(result, EventResult::Ignored);
    }
}
