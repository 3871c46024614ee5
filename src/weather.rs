//! Sample weather forecast data shown by the fetch-data views.

use async_trait::async_trait;
use chrono::{Days, Local, NaiveDate};
use color_eyre::Result;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

const SUMMARIES: &[&str] = &[
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Number of forecasts returned per request.
const FORECAST_DAYS: u64 = 5;

/// How far back the first forecast starts.
const DAYS_BACK: u64 = 14;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: String,
}

impl WeatherForecast {
    #[allow(clippy::cast_possible_truncation)]
    pub fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) / 0.5556) as i32
    }
}

/// Source of weather forecasts.
#[async_trait]
pub trait WeatherForecastService: Send + Sync {
    async fn get_forecast(&self) -> Result<Vec<WeatherForecast>>;
}

/// Generates random forecasts locally.
#[derive(Debug, Default, Clone, Copy)]
pub struct SampleWeatherService;

impl SampleWeatherService {
    /// Five consecutive daily forecasts starting `DAYS_BACK - 1` days before `today`.
    pub fn forecast_from<R: Rng>(today: NaiveDate, rng: &mut R) -> Vec<WeatherForecast> {
        let start = today - Days::new(DAYS_BACK);
        (1..=FORECAST_DAYS)
            .map(|offset| WeatherForecast {
                date: start + Days::new(offset),
                temperature_c: rng.gen_range(-20..55),
                summary: SUMMARIES
                    .choose(rng)
                    .copied()
                    .unwrap_or(SUMMARIES[0])
                    .to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl WeatherForecastService for SampleWeatherService {
    async fn get_forecast(&self) -> Result<Vec<WeatherForecast>> {
        let today = Local::now().date_naive();
        Ok(Self::forecast_from(today, &mut rand::thread_rng()))
    }
}
