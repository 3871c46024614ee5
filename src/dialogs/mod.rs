//! Dialogs the app can show in a modal.
//!
//! Each dialog has a type token implementing [`Dialog`](crate::modal::Dialog)
//! and a provider registered with the [`DialogRegistry`].

mod counter;
mod fetch_data;
mod yes_no;

use std::sync::Arc;

pub use counter::{CounterDialog, CounterDialogProvider};
pub use fetch_data::{FetchDataDialog, FetchDataDialogProvider};
pub use yes_no::{MESSAGE_PARAM, YesNoDialog, YesNoProvider};

use crate::modal::DialogRegistry;
use crate::weather::WeatherForecastService;

/// Register all built-in dialogs.
pub fn register_all(registry: &mut DialogRegistry, weather: Arc<dyn WeatherForecastService>) {
    registry.register(YesNoProvider);
    registry.register(CounterDialogProvider);
    registry.register(FetchDataDialogProvider::new(weather));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::Dialog;
    use crate::weather::SampleWeatherService;

    #[test]
    fn test_register_all() {
        let mut registry = DialogRegistry::new();
        register_all(&mut registry, Arc::new(SampleWeatherService));

        assert_eq!(
            registry.kinds(),
            vec![CounterDialog::KIND, FetchDataDialog::KIND, YesNoDialog::KIND]
        );
    }
}
