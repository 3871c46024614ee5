use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

use crate::Theme;
use crate::config::ForecastAction;
use crate::modal::{Dialog, DialogContext, DialogKind, DialogProvider, DialogView, ModalResult};
use crate::ui::{Component, EventResult, ForecastEvent, ForecastTable, Keybinding, Result};
use crate::view::{View, ViewContext};
use crate::weather::WeatherForecastService;

/// The forecast table hosted in a dialog; submitting resolves `Ok` with the
/// forecasts as JSON.
pub struct FetchDataDialog;

impl Dialog for FetchDataDialog {
    const KIND: DialogKind = DialogKind::new("fetch-data");
}

pub struct FetchDataDialogProvider {
    service: Arc<dyn WeatherForecastService>,
}

impl FetchDataDialogProvider {
    pub fn new(service: Arc<dyn WeatherForecastService>) -> Self {
        Self { service }
    }
}

impl DialogProvider for FetchDataDialogProvider {
    fn kind(&self) -> DialogKind {
        FetchDataDialog::KIND
    }

    fn display_name(&self) -> &'static str {
        "Fetch Data"
    }

    fn mount(&self, ctx: DialogContext) -> Box<dyn DialogView> {
        let table = ForecastTable::new(self.service.clone(), ctx.resolver().clone());
        Box::new(FetchDataDialogView { ctx, table })
    }
}

struct FetchDataDialogView {
    ctx: DialogContext,
    table: ForecastTable,
}

impl View for FetchDataDialogView {
    fn context(&self) -> &ViewContext {
        &self.ctx.view
    }
}

impl DialogView for FetchDataDialogView {
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<()>> {
        if let EventResult::Event(ForecastEvent::Submitted(forecasts)) = self.table.handle_key(key)? {
            let data = serde_json::to_value(forecasts)?;
            self.ctx.modal.close(ModalResult::ok(Some(data)))?;
        }
        Ok(EventResult::Consumed)
    }

    fn handle_tick(&mut self) {
        self.table.handle_tick();
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        self.table.render(frame, area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        let resolver = self.ctx.resolver();
        vec![
            Keybinding::new(resolver.display_forecast(ForecastAction::Reload), "Reload"),
            Keybinding::new(resolver.display_forecast(ForecastAction::Submit), "Submit"),
        ]
    }
}
