//! Launcher domain state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long a toast stays up unless it asks for something else.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Icon used when a toast does not name one.
pub const DEFAULT_TOAST_ICON: &str = "fa-bell";

/// Who is staying in the room.
///
/// Fields are merged one by one from host payloads; the struct is never empty
/// because it starts from [`GuestState::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuestState {
    /// Full name.
    pub name: String,
    /// Room or suite number.
    pub room: String,
    /// Loyalty tier.
    pub tier: String,
}

impl Default for GuestState {
    fn default() -> Self {
        Self { name: "Alexander Henderson".into(), room: "802".into(), tier: "Gold".into() }
    }
}

impl GuestState {
    /// First word of the name, used in the welcome banner.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// One day of forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Day label, e.g. `Tue`.
    pub day: String,
    /// Temperature.
    pub temp: f64,
    /// Icon name.
    #[serde(default)]
    pub icon: String,
}

/// Current weather plus a short forecast.
///
/// Always replaced as a whole, never merged field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Current temperature.
    pub temp: f64,
    /// Human-readable condition.
    pub condition: String,
    /// City shown next to the temperature.
    pub city: String,
    /// Icon name.
    #[serde(default)]
    pub icon: String,
    /// Upcoming days.
    #[serde(default)]
    pub forecast: Vec<ForecastDay>,
}

/// A geographic position, optionally named.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// City name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Location {
    /// Location used when bootstrap established no weather at all.
    pub fn fallback() -> Self {
        Self { lat: 37.7749, lon: -122.4194, city: Some("San Francisco".into()) }
    }
}

/// A wake-up alarm pushed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlarmEntry {
    /// Host-assigned id.
    pub id: String,
    /// Local time as `HH:MM`.
    pub time: String,
    /// Free text.
    #[serde(default)]
    pub label: String,
    /// Disabled alarms never fire.
    #[serde(default)]
    pub enabled: bool,
    /// Weekdays (0 = Sunday) on which the alarm fires; empty means every day.
    #[serde(default)]
    pub repeat: Vec<u8>,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastEntry {
    /// Unique id; expiry timers carry it so a replaced toast is not dismissed
    /// by its predecessor's timer.
    pub id: String,
    /// Heading.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Icon name.
    pub icon: String,
    /// Time on screen.
    pub duration: Duration,
}

impl ToastEntry {
    /// A toast with the default icon and duration.
    pub fn new(id: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            icon: DEFAULT_TOAST_ICON.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }

    /// Replace the icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Replace the duration.
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}
