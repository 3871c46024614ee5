use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::config::ForecastAction;
use crate::ui::{Component, EventResult, ForecastTable, Keybinding, Result};
use crate::view::{Page, View, ViewContext};
use crate::weather::WeatherForecastService;

pub struct FetchDataPage {
    ctx: ViewContext,
    table: ForecastTable,
}

impl FetchDataPage {
    pub fn new(ctx: ViewContext, service: Arc<dyn WeatherForecastService>) -> Self {
        let table = ForecastTable::new(service, ctx.resolver().clone());
        Self { ctx, table }
    }
}

impl View for FetchDataPage {
    fn context(&self) -> &ViewContext {
        &self.ctx
    }
}

impl Page for FetchDataPage {
    fn title(&self) -> &'static str {
        "Weather forecast"
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        Ok(match self.table.handle_key(key)? {
            EventResult::Ignored => EventResult::Ignored,
            _ => EventResult::Consumed,
        })
    }

    fn handle_tick(&mut self) {
        self.table.handle_tick();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.table.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![Keybinding::new(
            self.ctx.resolver().display_forecast(ForecastAction::Reload),
            "Reload",
        )]
    }
}
