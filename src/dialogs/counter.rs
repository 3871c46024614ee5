use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use serde_json::json;

use crate::Theme;
use crate::config::CounterAction;
use crate::modal::{Dialog, DialogContext, DialogKind, DialogProvider, DialogView, ModalResult};
use crate::ui::{Component, Counter, CounterEvent, EventResult, Keybinding, Result};
use crate::view::{View, ViewContext};

/// The counter hosted in a dialog; submitting resolves `Ok` with the count.
pub struct CounterDialog;

impl Dialog for CounterDialog {
    const KIND: DialogKind = DialogKind::new("counter");
}

pub struct CounterDialogProvider;

impl DialogProvider for CounterDialogProvider {
    fn kind(&self) -> DialogKind {
        CounterDialog::KIND
    }

    fn display_name(&self) -> &'static str {
        "Counter"
    }

    fn mount(&self, ctx: DialogContext) -> Box<dyn DialogView> {
        let counter = Counter::new(ctx.resolver().clone());
        Box::new(CounterDialogView { ctx, counter })
    }
}

struct CounterDialogView {
    ctx: DialogContext,
    counter: Counter,
}

impl View for CounterDialogView {
    fn context(&self) -> &ViewContext {
        &self.ctx.view
    }
}

impl DialogView for CounterDialogView {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if let EventResult::Event(CounterEvent::Submitted(count)) = self.counter.handle_key(key)? {
            self.ctx.modal.close(ModalResult::ok(Some(json!(count))))?;
        }
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.counter.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let resolver = self.ctx.resolver();
        vec![
            Keybinding::new(resolver.display_counter(CounterAction::Increment), "Increment"),
            Keybinding::new(resolver.display_counter(CounterAction::Decrement), "Decrement"),
            Keybinding::new(resolver.display_counter(CounterAction::Submit), "Submit"),
        ]
    }
}
