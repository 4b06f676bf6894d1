//! Weather collaborators.
//!
//! - [`StaticWeather`]: the configured city table, for offline use
//! - [`OpenMeteoWeather`]: live forecasts over HTTP

use std::sync::Arc;

use roomlink_app::WeatherService;

use crate::config::{WeatherSection, WeatherSource};

mod open_meteo;
mod table;

pub use open_meteo::{OpenMeteoWeather, WeatherError, condition_text, parse_forecast, parse_place};
pub use table::StaticWeather;

/// The weather service selected by `[weather] source`.
pub fn from_config(section: &WeatherSection) -> Arc<dyn WeatherService> {
    match section.source {
        WeatherSource::Static => Arc::new(StaticWeather::new(section)),
        WeatherSource::OpenMeteo => Arc::new(OpenMeteoWeather::new(section)),
    }
}
