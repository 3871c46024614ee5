use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::config::CounterAction;
use crate::ui::{Component, Counter, EventResult, Keybinding, Result};
use crate::view::{Page, View, ViewContext};

pub struct CounterPage {
    ctx: ViewContext,
    counter: Counter,
}

impl CounterPage {
    pub fn new(ctx: ViewContext) -> Self {
        let counter = Counter::new(ctx.resolver().clone());
        Self { ctx, counter }
    }
}

impl View for CounterPage {
    fn context(&self) -> &ViewContext {
        &self.ctx
    }
}

impl Page for CounterPage {
    fn title(&self) -> &'static str {
        "Counter"
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        // Submitting means nothing outside a dialog.
        Ok(match self.counter.handle_key(key)? {
            EventResult::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.counter.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let resolver = self.ctx.resolver();
        vec![
            Keybinding::new(resolver.display_counter(CounterAction::Increment), "Increment"),
            Keybinding::new(resolver.display_counter(CounterAction::Decrement), "Decrement"),
        ]
    }
}
