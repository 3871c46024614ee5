use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use tracing::debug;

use crate::Theme;
use crate::config::DialogAction;
use crate::modal::{Dialog, DialogContext, DialogKind, DialogProvider, DialogView, ModalResult};
use crate::ui::{EventResult, Keybinding, Result};
use crate::view::{View, ViewContext};

/// Parameter holding the question to ask.
pub const MESSAGE_PARAM: &str = "Message";

const DEFAULT_MESSAGE: &str = "Are You Sure?";

/// Yes/no confirmation. Yes resolves with `Exit`, no with `Cancel`.
pub struct YesNoDialog;

impl Dialog for YesNoDialog {
    const KIND: DialogKind = DialogKind::new("yes-no");
}

pub struct YesNoProvider;

impl DialogProvider for YesNoProvider {
    fn kind(&self) -> DialogKind {
        YesNoDialog::KIND
    }

    fn display_name(&self) -> &'static str {
        "Yes / No"
    }

    fn mount(&self, ctx: DialogContext) -> Box<dyn DialogView> {
        Box::new(YesNoView { ctx })
    }
}

struct YesNoView {
    ctx: DialogContext,
}

impl YesNoView {
    /// Read on every render so updated parameters show up.
    fn message(&self) -> String {
        let message = self
            .ctx
            .modal
            .options()
            .map(|options| options.get_parameter_as_string(MESSAGE_PARAM))
            .unwrap_or_default();
        if message.is_empty() {
            DEFAULT_MESSAGE.to_string()
        } else {
            message
        }
    }
}

impl View for YesNoView {
    fn context(&self) -> &ViewContext {
        &self.ctx.view
    }
}

impl DialogView for YesNoView {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        let resolver = self.ctx.resolver();
        if resolver.matches_dialog(&key, DialogAction::Confirm) {
            debug!(view = %self.id(), modal = %self.ctx.modal.id(), "confirmed");
            self.ctx.modal.close(ModalResult::exit(None))?;
        } else if resolver.matches_dialog(&key, DialogAction::Cancel) {
            debug!(view = %self.id(), modal = %self.ctx.modal.id(), "cancelled");
            self.ctx.modal.close(ModalResult::cancel())?;
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let resolver = self.ctx.resolver();
        let key_style = Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(Span::styled(self.message(), Style::default().fg(theme.text()))),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("[{}]", resolver.display_dialog(DialogAction::Confirm)), key_style),
                Span::raw(" "),
                Span::styled(
                    "Yes",
                    Style::default()
                        .fg(theme.green())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled(format!("[{}]", resolver.display_dialog(DialogAction::Cancel)), key_style),
                Span::raw(" "),
                Span::styled(
                    "No",
                    Style::default()
                        .fg(theme.overlay1())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        let area = area.centered(Constraint::Percentage(100), Constraint::Length(3));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let resolver = self.ctx.resolver();
        vec![
            Keybinding::new(resolver.display_dialog(DialogAction::Confirm), "Yes"),
            Keybinding::new(resolver.display_dialog(DialogAction::Cancel), "No"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyCode;
    use futures::FutureExt;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::config::KeyResolver;
    use crate::modal::{DialogRegistry, ModalOptions, ModalResultType};
    use crate::view::ViewManager;

    fn mount(manager: &ViewManager) -> Box<dyn DialogView> {
        let mut registry = DialogRegistry::new();
        registry.register(YesNoProvider);
        registry
            .mount_open(manager, Arc::new(KeyResolver::default()))
            .unwrap()
            .unwrap()
    }

    fn screen(dialog: &mut Box<dyn DialogView>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 5)).unwrap();
        terminal
            .draw(|frame| dialog.render(frame, frame.area(), &Theme::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_yes_resolves_exit() {
        let manager = ViewManager::new();
        let pending = manager.show_modal_async::<YesNoDialog>(ModalOptions::new()).unwrap();
        let mut dialog = mount(&manager);

        dialog.handle_key(KeyEvent::from(KeyCode::Char('y'))).unwrap();

        let result = pending.now_or_never().unwrap();
        assert_eq!(result.result_type, ModalResultType::Exit);
        assert!(result.data.is_none());
    }

    #[test]
    fn test_no_resolves_cancel() {
        let manager = ViewManager::new();
        let pending = manager.show_modal_async::<YesNoDialog>(ModalOptions::new()).unwrap();
        let mut dialog = mount(&manager);

        dialog.handle_key(KeyEvent::from(KeyCode::Char('n'))).unwrap();

        assert_eq!(pending.now_or_never().unwrap(), ModalResult::cancel());
    }

    #[test]
    fn test_other_keys_are_captured() {
        let manager = ViewManager::new();
        let _pending = manager.show_modal_async::<YesNoDialog>(ModalOptions::new()).unwrap();
        let mut dialog = mount(&manager);

        let result = dialog.handle_key(KeyEvent::from(KeyCode::Char('q'))).unwrap();
        assert!(result.is_consumed());
        assert!(manager.host().is_open());
    }

    #[test]
    fn test_message_parameter() {
        let manager = ViewManager::new();
        let options = ModalOptions::new().with_parameter(MESSAGE_PARAM, "Leave this page?");
        let _pending = manager.show_modal_async::<YesNoDialog>(options).unwrap();
        let mut dialog = mount(&manager);

        assert!(screen(&mut dialog).contains("Leave this page?"));
    }

    #[test]
    fn test_default_message() {
        let manager = ViewManager::new();
        let _pending = manager.show_modal_async::<YesNoDialog>(ModalOptions::new()).unwrap();
        let mut dialog = mount(&manager);

        assert!(screen(&mut dialog).contains(DEFAULT_MESSAGE));
    }
}
