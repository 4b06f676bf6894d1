//! Launcher configuration
//!
//! An optional TOML file with `[bridge]`, `[launcher]` and `[weather]`
//! sections. Every field has a default, so an empty file (or no file at all)
//! is a valid configuration. Command-line flags are applied on top with
//! [`LauncherConfig::apply`].

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use roomlink_client::{DEFAULT_CALL_TIMEOUT, DEFAULT_MOCK_LATENCY};
use roomlink_core::WeatherSnapshot;
use serde::Deserialize;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid TOML or does not match the schema.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid value for {field}: {reason}")]
    Invalid {
        /// Dotted field name.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Complete launcher configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    /// Host connection.
    pub bridge: BridgeSection,
    /// Presentation.
    pub launcher: LauncherSection,
    /// Weather source.
    pub weather: WeatherSection,
}

/// `[bridge]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeSection {
    /// Address of the native host channel. Absent means the mock host.
    pub host: Option<String>,
    /// Per-call timeout in milliseconds.
    pub timeout_ms: u64,
    /// Simulated round-trip time of the mock host in milliseconds.
    pub mock_latency_ms: u64,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            host: None,
            timeout_ms: DEFAULT_CALL_TIMEOUT.as_millis() as u64,
            mock_latency_ms: DEFAULT_MOCK_LATENCY.as_millis() as u64,
        }
    }
}

impl BridgeSection {
    /// Per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Mock host latency.
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

/// `[launcher]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherSection {
    /// Show the welcome splash at start-up.
    pub show_splash: bool,
    /// User agent reported by the platform; used for host detection.
    pub user_agent: String,
}

impl Default for LauncherSection {
    fn default() -> Self {
        Self { show_splash: true, user_agent: String::new() }
    }
}

/// Where weather comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherSource {
    /// The configured city table. Works offline.
    #[default]
    Static,
    /// Open-Meteo forecasts with Nominatim reverse geocoding.
    OpenMeteo,
}

/// `[weather]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WeatherSection {
    /// Which weather service to use.
    pub source: WeatherSource,
    /// City reported for locations that are not in the table.
    pub fallback_city: String,
    /// Known cities.
    pub cities: Vec<CityWeather>,
    /// Open-Meteo forecast endpoint.
    pub forecast_url: String,
    /// Reverse geocoding endpoint.
    pub geocode_url: String,
    /// HTTP timeout in milliseconds.
    pub timeout_ms: u64,
}

impl WeatherSection {
    /// HTTP timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for WeatherSection {
    fn default() -> Self {
        let city = |city: &str, temp: f64, condition: &str, icon: &str| CityWeather {
            city: city.into(),
            temp,
            condition: condition.into(),
            icon: icon.into(),
        };
        Self {
            source: WeatherSource::Static,
            forecast_url: "https://api.open-meteo.com/v1/forecast".into(),
            geocode_url: "https://nominatim.openstreetmap.org/reverse".into(),
            timeout_ms: 10_000,
            fallback_city: "San Francisco".into(),
            cities: vec![
                city("San Francisco", 18.0, "Partly Cloudy", "cloud-sun"),
                city("New York", 12.0, "Clear", "sun"),
                city("London", 9.0, "Light Rain", "cloud-rain"),
                city("Paris", 11.0, "Overcast", "cloud"),
                city("Tokyo", 16.0, "Clear", "sun"),
                city("Dubai", 31.0, "Sunny", "sun"),
            ],
        }
    }
}

/// One row of the weather table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CityWeather {
    /// City name, matched case-insensitively.
    pub city: String,
    /// Temperature.
    pub temp: f64,
    /// Human-readable condition.
    pub condition: String,
    /// Icon name.
    #[serde(default)]
    pub icon: String,
}

impl CityWeather {
    /// The row as a snapshot.
    pub fn snapshot(&self) -> WeatherSnapshot {
        WeatherSnapshot {
            temp: self.temp,
            condition: self.condition.clone(),
            city: self.city.clone(),
            icon: self.icon.clone(),
            forecast: Vec::new(),
        }
    }
}

/// Values given on the command line. `None` keeps the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--host`
    pub host: Option<String>,
    /// `--mock`
    pub mock: bool,
}

impl LauncherConfig {
    /// Load from `path`, or use defaults when no path is given.
    ///
    /// An explicitly named file that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&raw)
    }

    /// Parse and validate a TOML document.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides. `--mock` wins over any host address.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(host) = &overrides.host {
            self.bridge.host = Some(host.clone());
        }
        if overrides.mock {
            self.bridge.host = None;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "bridge.timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if self.bridge.host.as_deref().is_some_and(|h| h.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "bridge.host",
                reason: "must not be empty".into(),
            });
        }
        if self.weather.source == WeatherSource::OpenMeteo && self.weather.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "weather.timeout_ms",
                reason: "must be greater than zero".into(),
            });
        }
        if let Some(row) = self.weather.cities.iter().find(|c| c.city.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "weather.cities",
                reason: format!("entry with condition {:?} has no city", row.condition),
            });
        }
        Ok(())
    }
}
