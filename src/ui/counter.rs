use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::config::{CounterAction, KeyResolver};
use crate::ui::{Component, EventResult, Result};

pub enum CounterEvent {
    Submitted(i64),
}

/// Click-counter widget.
pub struct Counter {
    count: i64,
    resolver: Arc<KeyResolver>,
}

impl Counter {
    pub const fn new(resolver: Arc<KeyResolver>) -> Self {
        Self { count: 0, resolver }
    }

    pub const fn count(&self) -> i64 {
        self.count
    }
}

impl Component for Counter {
    type Output = CounterEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_counter(&key, CounterAction::Increment) {
            self.count = self.count.saturating_add(1);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_counter(&key, CounterAction::Decrement) {
            self.count = self.count.saturating_sub(1);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_counter(&key, CounterAction::Submit) {
            return Ok(CounterEvent::Submitted(self.count).into());
        }
        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let area = area.centered(Constraint::Percentage(100), Constraint::Length(3));
        let hint_style = Style::default().fg(theme.overlay1());
        let key_style = Style::default().fg(theme.peach());

        let lines = vec![
            Line::from(vec![
                Span::styled("Current count: ", Style::default().fg(theme.text())),
                Span::styled(
                    self.count.to_string(),
                    Style::default()
                        .fg(theme.mauve())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled(self.resolver.display_counter(CounterAction::Increment), key_style),
                Span::styled(" click me  ", hint_style),
                Span::styled(self.resolver.display_counter(CounterAction::Decrement), key_style),
                Span::styled(" undo", hint_style),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}
