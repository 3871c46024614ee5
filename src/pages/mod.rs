//! Full-screen pages reachable through navigation.

mod counter;
mod fetch_data;
mod index;

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

pub use counter::CounterPage;
pub use fetch_data::FetchDataPage;
pub use index::IndexPage;

use crate::message::AppMessage;
use crate::navigation::Route;
use crate::view::{Page, ViewContext};
use crate::weather::WeatherForecastService;

/// Mount the page for `route`.
pub fn create_page(
    route: Route,
    ctx: ViewContext,
    messages: UnboundedSender<AppMessage>,
    weather: &Arc<dyn WeatherForecastService>,
) -> Box<dyn Page> {
    match route {
        Route::Index => Box::new(IndexPage::new(ctx, messages)),
        Route::Counter => Box::new(CounterPage::new(ctx)),
        Route::FetchData => Box::new(FetchDataPage::new(ctx, weather.clone())),
    }
}
