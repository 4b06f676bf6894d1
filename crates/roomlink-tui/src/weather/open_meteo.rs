//! Open-Meteo forecasts with Nominatim reverse geocoding.
//!
//! Both requests go out together for each lookup. A failed geocode only
//! loses the city name; a failed forecast fails the lookup, which keeps
//! whatever weather the launcher already shows.

use std::io::Read;

use async_trait::async_trait;
use chrono::NaiveDate;
use roomlink_app::WeatherService;
use roomlink_core::{ForecastDay, Location, WeatherSnapshot};
use serde::Deserialize;
use thiserror::Error;
use tokio::task::{JoinError, spawn_blocking};

use crate::config::WeatherSection;

const USER_AGENT: &str = "HotelTVLauncher/1.0";

/// Days after today included in the forecast.
const FORECAST_DAYS: usize = 3;

/// Why a weather lookup failed.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The request failed or the server answered with an error status.
    #[error("weather request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    /// The body was not the expected JSON.
    #[error("unexpected weather response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The blocking request task did not finish.
    #[error("weather task failed: {0}")]
    Task(#[from] JoinError),
}

#[derive(Debug, Deserialize)]
struct ForecastBody {
    #[serde(default)]
    current: Current,
    #[serde(default)]
    daily: Daily,
}

#[derive(Debug, Default, Deserialize)]
struct Current {
    temperature_2m: Option<f64>,
    #[serde(alias = "weather_code")]
    weathercode: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct Daily {
    #[serde(default)]
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Vec<Option<f64>>,
}

impl ForecastBody {
    fn into_snapshot(self, city: String) -> WeatherSnapshot {
        let forecast = self
            .daily
            .time
            .iter()
            .enumerate()
            .skip(1)
            .take(FORECAST_DAYS)
            .map(|(i, day)| {
                let max = self.daily.temperature_2m_max.get(i).copied().flatten();
                ForecastDay {
                    day: weekday_label(day),
                    temp: max.unwrap_or(0.0).round(),
                    icon: String::new(),
                }
            })
            .collect();

        WeatherSnapshot {
            temp: self.current.temperature_2m.unwrap_or(0.0).round(),
            condition: condition_text(self.current.weathercode.unwrap_or(0)).to_owned(),
            city,
            icon: String::new(),
            forecast,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    municipality: Option<String>,
}

/// Human-readable text for a WMO weather code.
pub fn condition_text(code: u32) -> &'static str {
    match code {
        0 => "Clear Sky",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing Rime Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        61 => "Slight Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        71 => "Slight Snow",
        73 => "Moderate Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Slight Showers",
        81 => "Moderate Showers",
        82 => "Violent Showers",
        85 => "Slight Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with Hail",
        99 => "Severe Thunderstorm",
        _ => "Cloudy",
    }
}

fn weekday_label(day: &str) -> String {
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_or_else(|_| day.to_owned(), |date| date.format("%a").to_string())
}

/// Decode a forecast response into a snapshot for `city`.
pub fn parse_forecast(
    body: impl Read,
    city: String,
) -> Result<WeatherSnapshot, serde_json::Error> {
    let body: ForecastBody = serde_json::from_reader(body)?;
    Ok(body.into_snapshot(city))
}

/// Decode a reverse geocoding response into the most specific place name.
pub fn parse_place(body: impl Read) -> Result<Option<String>, serde_json::Error> {
    let Place { address } = serde_json::from_reader(body)?;
    Ok([address.city, address.town, address.village, address.municipality]
        .into_iter()
        .flatten()
        .find(|name| !name.is_empty()))
}

/// [`WeatherService`] backed by the Open-Meteo and Nominatim HTTP APIs.
#[derive(Clone)]
pub struct OpenMeteoWeather {
    agent: ureq::Agent,
    forecast_url: String,
    geocode_url: String,
}

impl OpenMeteoWeather {
    /// Build from the `[weather]` configuration section.
    pub fn new(section: &WeatherSection) -> Self {
        let agent =
            ureq::AgentBuilder::new().timeout(section.timeout()).user_agent(USER_AGENT).build();
        Self {
            agent,
            forecast_url: section.forecast_url.clone(),
            geocode_url: section.geocode_url.clone(),
        }
    }

    fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<ForecastBody, WeatherError> {
        let response = self
            .agent
            .get(&self.forecast_url)
            .query("latitude", &lat.to_string())
            .query("longitude", &lon.to_string())
            .query("current", "temperature_2m,weathercode")
            .query("daily", "weathercode,temperature_2m_max")
            .query("timezone", "auto")
            .call()
            .map_err(Box::new)?;
        Ok(serde_json::from_reader(response.into_reader())?)
    }

    fn reverse_geocode(&self, lat: f64, lon: f64) -> Result<Option<String>, WeatherError> {
        let response = self
            .agent
            .get(&self.geocode_url)
            .query("lat", &lat.to_string())
            .query("lon", &lon.to_string())
            .query("format", "json")
            .query("zoom", "10")
            .call()
            .map_err(Box::new)?;
        Ok(parse_place(response.into_reader())?)
    }

    /// Current weather and forecast at `location`.
    pub async fn lookup(&self, location: &Location) -> Result<WeatherSnapshot, WeatherError> {
        let (lat, lon) = (location.lat, location.lon);
        let forecast = {
            let this = self.clone();
            spawn_blocking(move || this.fetch_forecast(lat, lon))
        };
        let place = {
            let this = self.clone();
            spawn_blocking(move || this.reverse_geocode(lat, lon))
        };
        let (forecast, place) = tokio::join!(forecast, place);

        let place = match place {
            Ok(Ok(place)) => place,
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "reverse geocode failed");
                None
            },
            Err(e) => {
                tracing::debug!(error = %e, "reverse geocode task failed");
                None
            },
        };
        let city = place.or_else(|| location.city.clone()).unwrap_or_default();
        Ok(forecast??.into_snapshot(city))
    }
}

#[async_trait]
impl WeatherService for OpenMeteoWeather {
    async fn weather(&self, location: &Location) -> Option<WeatherSnapshot> {
        match self.lookup(location).await {
            Ok(snapshot) => {
                tracing::debug!(city = %snapshot.city, temp = snapshot.temp, "weather fetched");
                Some(snapshot)
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    lat = location.lat,
                    lon = location.lon,
                    "weather fetch failed"
                );
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: &str = r#"{
        "latitude": 51.5,
        "longitude": -0.119999886,
        "timezone": "Europe/London",
        "current_units": { "temperature_2m": "°C", "weathercode": "wmo code" },
        "current": { "time": "2026-03-02T09:00", "interval": 900, "temperature_2m": 8.6, "weathercode": 61 },
        "daily_units": { "weathercode": "wmo code", "temperature_2m_max": "°C" },
        "daily": {
            "time": ["2026-03-02", "2026-03-03", "2026-03-04", "2026-03-05", "2026-03-06"],
            "weathercode": [61, 3, 2, 0, 80],
            "temperature_2m_max": [10.2, 11.6, 9.4, 12.5, 8.0]
        }
    }"#;

    #[test]
    fn recorded_forecast_becomes_snapshot() {
        let snapshot = parse_forecast(LONDON.as_bytes(), "London".into()).unwrap();
        assert_eq!(snapshot.temp, 9.0);
        assert_eq!(snapshot.condition, "Slight Rain");
        assert_eq!(snapshot.city, "London");

        let days: Vec<_> = snapshot.forecast.iter().map(|d| (d.day.as_str(), d.temp)).collect();
        assert_eq!(days, vec![("Tue", 12.0), ("Wed", 9.0), ("Thu", 13.0)]);
    }

    #[test]
    fn sparse_forecast_uses_zero_and_clear_sky() {
        let body = r#"{"daily":{"time":["2026-03-02","2026-03-03"]}}"#;
        let snapshot = parse_forecast(body.as_bytes(), String::new()).unwrap();
        assert_eq!(snapshot.temp, 0.0);
        assert_eq!(snapshot.condition, "Clear Sky");
        assert_eq!(snapshot.forecast.len(), 1);
        assert_eq!(snapshot.forecast[0].temp, 0.0);
    }

    #[test]
    fn newer_weather_code_name_is_accepted() {
        let body = r#"{"current":{"temperature_2m":-3.4,"weather_code":73}}"#;
        let snapshot = parse_forecast(body.as_bytes(), "Oslo".into()).unwrap();
        assert_eq!(snapshot.condition, "Moderate Snow");
        assert_eq!(snapshot.temp, -3.0);
    }

    #[test]
    fn unknown_codes_read_cloudy() {
        assert_eq!(condition_text(96), "Thunderstorm with Hail");
        assert_eq!(condition_text(4), "Cloudy");
    }

    #[test]
    fn place_prefers_the_most_specific_name() {
        let place = |body: &str| parse_place(body.as_bytes()).unwrap();
        assert_eq!(place(r#"{"address":{"city":"Paris","town":"x"}}"#).as_deref(), Some("Paris"));
        let village = place(r#"{"address":{"city":"","village":"Gordes"}}"#);
        assert_eq!(village.as_deref(), Some("Gordes"));
        assert_eq!(place(r#"{"error":"Unable to geocode"}"#), None);
    }
}
