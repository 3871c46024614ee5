use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Paragraph, Row, Table, Wrap};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::Theme;
use crate::config::{ForecastAction, KeyResolver};
use crate::ui::{Component, EventResult, Result, Spinner};
use crate::weather::{WeatherForecast, WeatherForecastService};

pub enum ForecastEvent {
    Submitted(Vec<WeatherForecast>),
}

enum LoadState {
    Loading(oneshot::Receiver<std::result::Result<Vec<WeatherForecast>, String>>),
    Loaded(Vec<WeatherForecast>),
    Failed(String),
}

/// Table of weather forecasts, loaded in the background.
///
/// Loading starts on construction and on reload; the result is picked up on
/// the next tick.
pub struct ForecastTable {
    service: Arc<dyn WeatherForecastService>,
    state: LoadState,
    spinner: Spinner,
    resolver: Arc<KeyResolver>,
}

impl ForecastTable {
    pub fn new(service: Arc<dyn WeatherForecastService>, resolver: Arc<KeyResolver>) -> Self {
        let state = Self::start_load(&service);
        Self {
            service,
            state,
            spinner: Spinner::new("Loading..."),
            resolver,
        }
    }

    fn start_load(service: &Arc<dyn WeatherForecastService>) -> LoadState {
        let (tx, rx) = oneshot::channel();
        let service = service.clone();
        tokio::spawn(async move {
            let result = service.get_forecast().await.map_err(|e| e.to_string());
            // The table may have been unmounted while loading.
            let _ = tx.send(result);
        });
        LoadState::Loading(rx)
    }

    pub fn reload(&mut self) {
        debug!("reloading forecasts");
        self.state = Self::start_load(&self.service);
    }

    pub const fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading(_))
    }

    pub fn forecasts(&self) -> Option<&[WeatherForecast]> {
        match &self.state {
            LoadState::Loaded(forecasts) => Some(forecasts),
            _ => None,
        }
    }

    fn poll_load(&mut self) {
        let LoadState::Loading(rx) = &mut self.state else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(forecasts)) => self.state = LoadState::Loaded(forecasts),
            Ok(Err(error)) => {
                warn!(%error, "failed to load forecasts");
                self.state = LoadState::Failed(error);
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                self.state = LoadState::Failed("forecast task stopped".to_string());
            }
        }
    }
}

impl Component for ForecastTable {
    type Output = ForecastEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_forecast(&key, ForecastAction::Reload) {
            self.reload();
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_forecast(&key, ForecastAction::Submit) {
            return Ok(match &self.state {
                LoadState::Loaded(forecasts) => ForecastEvent::Submitted(forecasts.clone()).into(),
                _ => EventResult::Consumed,
            });
        }
        Ok(EventResult::Ignored)
    }

    fn handle_tick(&mut self) {
        self.poll_load();
        if self.is_loading() {
            self.spinner.handle_tick();
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match &self.state {
            LoadState::Loading(_) => self.spinner.render(frame, area, theme),
            LoadState::Failed(error) => {
                let paragraph = Paragraph::new(format!("Could not load forecasts: {error}"))
                    .style(Style::default().fg(theme.red()))
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true });
                frame.render_widget(paragraph, area);
            }
            LoadState::Loaded(forecasts) => {
                let header = Row::new(["Date", "Temp. (C)", "Temp. (F)", "Summary"]).style(
                    Style::default()
                        .fg(theme.yellow())
                        .add_modifier(Modifier::BOLD),
                );
                let rows = forecasts.iter().map(|forecast| {
                    Row::new(vec![
                        Cell::from(forecast.date.format("%Y-%m-%d").to_string()),
                        Cell::from(forecast.temperature_c.to_string()),
                        Cell::from(forecast.temperature_f().to_string()),
                        Cell::from(forecast.summary.clone()),
                    ])
                    .style(Style::default().fg(theme.text()))
                });
                let table = Table::new(
                    rows,
                    [
                        Constraint::Length(12),
                        Constraint::Length(10),
                        Constraint::Length(10),
                        Constraint::Min(10),
                    ],
                )
                .header(header)
                .column_spacing(2);
                frame.render_widget(table, area);
            }
        }
    }
}
