//! Static weather table.
//!
//! Lookups are answered from the configured table without touching the
//! network. Unknown cities get a generic snapshot labelled with the
//! requested city, or the fallback city when the location is unnamed.

use async_trait::async_trait;
use roomlink_app::WeatherService;
use roomlink_core::{Location, WeatherSnapshot};

use crate::config::WeatherSection;

const GENERIC_TEMP: f64 = 20.0;
const GENERIC_CONDITION: &str = "Fair";
const GENERIC_ICON: &str = "cloud-sun";

/// [`WeatherService`] backed by a fixed table.
#[derive(Debug, Clone)]
pub struct StaticWeather {
    table: Vec<WeatherSnapshot>,
    fallback_city: String,
}

impl StaticWeather {
    /// Build from the `[weather]` configuration section.
    pub fn new(section: &WeatherSection) -> Self {
        Self {
            table: section.cities.iter().map(|row| row.snapshot()).collect(),
            fallback_city: section.fallback_city.clone(),
        }
    }

    /// Snapshot for `location`. Always answers.
    pub fn lookup(&self, location: &Location) -> WeatherSnapshot {
        let city = location.city.as_deref().unwrap_or(&self.fallback_city);
        self.table
            .iter()
            .find(|row| row.city.eq_ignore_ascii_case(city))
            .cloned()
            .unwrap_or_else(|| WeatherSnapshot {
                temp: GENERIC_TEMP,
                condition: GENERIC_CONDITION.into(),
                city: city.to_owned(),
                icon: GENERIC_ICON.into(),
                forecast: Vec::new(),
            })
    }
}

#[async_trait]
impl WeatherService for StaticWeather {
    async fn weather(&self, location: &Location) -> Option<WeatherSnapshot> {
        let snapshot = self.lookup(location);
        tracing::debug!(city = %snapshot.city, temp = snapshot.temp, "weather lookup");
        Some(snapshot)
    }
}
