//! Dialog chrome driven by [`ModalOptions`].

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding};

use super::options::ModalOptions;
use crate::Theme;

/// Body class that removes the inner padding.
const NO_PADDING_CLASS: &str = "p-0";

/// Dialog size derived from the CSS class hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl FrameSize {
    /// Picks the size from a class list such as `"modal-xl shadow"`.
    pub fn from_css_class(class: &str) -> Self {
        class
            .split_whitespace()
            .find_map(|token| match token {
                "modal-sm" => Some(Self::Small),
                "modal-lg" => Some(Self::Large),
                "modal-xl" => Some(Self::ExtraLarge),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Width and height as percentages of the screen.
    const fn percentages(self) -> (u16, u16) {
        match self {
            Self::Small => (40, 30),
            Self::Medium => (50, 40),
            Self::Large => (70, 60),
            Self::ExtraLarge => (90, 80),
        }
    }
}

pub struct ModalFrame<'a> {
    options: &'a ModalOptions,
    close_hint: Option<String>,
}

impl<'a> ModalFrame<'a> {
    pub const fn new(options: &'a ModalOptions) -> Self {
        Self {
            options,
            close_hint: None,
        }
    }

    /// Key shown next to the close marker.
    #[must_use]
    pub fn with_close_hint(mut self, hint: impl Into<String>) -> Self {
        self.close_hint = Some(hint.into());
        self
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::from_css_class(&self.options.effective_css_class())
    }

    fn padding(&self) -> Padding {
        let body_class = self.options.effective_body_css_class();
        if body_class.split_whitespace().any(|c| c == NO_PADDING_CLASS) {
            Padding::ZERO
        } else {
            Padding::uniform(1)
        }
    }

    /// The outer area of the dialog within `area`.
    pub fn outer_area(&self, area: Rect) -> Rect {
        let (width, height) = self.size().percentages();
        area.centered(Constraint::Percentage(width), Constraint::Percentage(height))
    }

    /// Draws the chrome and returns the area left for the dialog body.
    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) -> Rect {
        let outer = self.outer_area(area);
        frame.render_widget(Clear, outer);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()))
            .padding(self.padding());

        if !self.options.hide_header && !self.options.title.is_empty() {
            block = block.title(Line::from(Span::styled(
                format!(" {} ", self.options.title),
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )));
        }

        if self.options.show_close_button {
            let marker = self
                .close_hint
                .as_ref()
                .map_or_else(|| " × ".to_string(), |hint| format!(" × {hint} "));
            block = block.title_top(
                Line::from(Span::styled(marker, Style::default().fg(theme.overlay1())))
                    .right_aligned(),
            );
        }

        let inner = block.inner(outer);
        frame.render_widget(block, outer);
        inner
    }
}
