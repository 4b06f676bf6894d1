//! Application state synchronizer.
//!
//! Merges sparse host payloads into launcher state. Payloads arrive from the
//! bootstrap sequence and from host events at any time afterwards; all of
//! them go through the same rules:
//!
//! - Guest fields merge one by one. Absent, `null`, empty or mistyped fields
//!   leave the current value alone.
//! - The weather snapshot and the alarm list are replaced as a whole.
//! - The DND flag only changes when the payload carries a boolean.
//! - A `location` never changes state directly; it yields a weather request
//!   for the caller to fulfil.
//!
//! The most recently applied payload wins per field.

use serde::Serialize;
use serde_json::Value;

use crate::state::{AlarmEntry, GuestState, Location, WeatherSnapshot};

/// Side effects requested by a merge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyncOutcome {
    /// Some state changed and should be redrawn.
    pub changed: bool,
    /// The payload named a location; fetch weather for it.
    pub weather_request: Option<Location>,
}

impl SyncOutcome {
    fn merge(&mut self, other: Self) {
        self.changed |= other.changed;
        if other.weather_request.is_some() {
            self.weather_request = other.weather_request;
        }
    }
}

/// Guest, weather, DND and alarm state fed by the host.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct StateSync {
    guest: GuestState,
    weather: Option<WeatherSnapshot>,
    dnd: bool,
    alarms: Vec<AlarmEntry>,
}

impl StateSync {
    /// Default guest, no weather, DND off, no alarms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current guest.
    pub fn guest(&self) -> &GuestState {
        &self.guest
    }

    /// Current weather, if any has been established.
    pub fn weather(&self) -> Option<&WeatherSnapshot> {
        self.weather.as_ref()
    }

    /// Whether weather has been established by any source.
    pub fn has_weather(&self) -> bool {
        self.weather.is_some()
    }

    /// Do-not-disturb flag.
    pub fn dnd(&self) -> bool {
        self.dnd
    }

    /// Current alarm list.
    pub fn alarms(&self) -> &[AlarmEntry] {
        &self.alarms
    }

    /// Merge a provisioning configuration (`config.get` result).
    ///
    /// Recognized members: `checkin.guestName`, `checkin.roomNumber`,
    /// `location`.
    pub fn apply_config(&mut self, config: &Value) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        if let Some(checkin) = config.get("checkin").filter(|v| v.is_object()) {
            outcome.changed |= self.merge_guest(
                text_field(checkin.get("guestName")),
                text_field(checkin.get("roomNumber")),
                None,
            );
        }

        outcome.merge(location_request(config));
        tracing::debug!(changed = outcome.changed, "applied config payload");
        outcome
    }

    /// Merge a state payload (`state.get` result, cached preference or
    /// `state.changed` event).
    ///
    /// Recognized members: `guest.name`, `guest.roomNumber`, `guest.tier`,
    /// `dnd`, `weather`, `alarms`, `location`.
    pub fn apply_state(&mut self, state: &Value) -> SyncOutcome {
        let mut outcome = SyncOutcome::default();

        if let Some(guest) = state.get("guest").filter(|v| v.is_object()) {
            outcome.changed |= self.merge_guest(
                text_field(guest.get("name")),
                text_field(guest.get("roomNumber")),
                text_field(guest.get("tier")),
            );
        }

        if let Some(dnd) = state.get("dnd").and_then(Value::as_bool) {
            outcome.changed |= self.dnd != dnd;
            self.dnd = dnd;
        }

        if let Some(weather) = state.get("weather").filter(|v| !v.is_null()) {
            match serde_json::from_value::<WeatherSnapshot>(weather.clone()) {
                Ok(snapshot) => outcome.changed |= self.set_weather(snapshot),
                Err(e) => tracing::warn!(error = %e, "ignoring undecodable weather snapshot"),
            }
        }

        if let Some(entries) = state.get("alarms").and_then(Value::as_array) {
            let alarms: Vec<AlarmEntry> = entries
                .iter()
                .filter_map(|entry| match serde_json::from_value(entry.clone()) {
                    Ok(alarm) => Some(alarm),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping undecodable alarm entry");
                        None
                    },
                })
                .collect();
            outcome.changed |= self.alarms != alarms;
            self.alarms = alarms;
        }

        outcome.merge(location_request(state));
        tracing::debug!(changed = outcome.changed, "applied state payload");
        outcome
    }

    /// Merge a `ui.checkin` event.
    ///
    /// Accepts `guestName` or `guest.name`, and `roomNumber` or
    /// `guest.roomNumber`. Returns `true` when at least one of them was
    /// present, which is the signal to show the welcome splash again, even if
    /// the values did not change.
    pub fn apply_checkin(&mut self, params: &Value) -> bool {
        let nested = params.get("guest");
        let name = text_field(params.get("guestName"))
            .or_else(|| text_field(nested.and_then(|g| g.get("name"))));
        let room = text_field(params.get("roomNumber"))
            .or_else(|| text_field(nested.and_then(|g| g.get("roomNumber"))));

        if name.is_none() && room.is_none() {
            return false;
        }
        self.merge_guest(name, room, None);
        true
    }

    /// Replace the weather snapshot. Returns whether it differed.
    pub fn set_weather(&mut self, snapshot: WeatherSnapshot) -> bool {
        let changed = self.weather.as_ref() != Some(&snapshot);
        self.weather = Some(snapshot);
        changed
    }

    /// Flip do-not-disturb and return the new value.
    pub fn toggle_dnd(&mut self) -> bool {
        self.dnd = !self.dnd;
        self.dnd
    }

    fn merge_guest(
        &mut self,
        name: Option<String>,
        room: Option<String>,
        tier: Option<String>,
    ) -> bool {
        let before = self.guest.clone();
        if let Some(name) = name {
            self.guest.name = name;
        }
        if let Some(room) = room {
            self.guest.room = room;
        }
        if let Some(tier) = tier {
            self.guest.tier = tier;
        }
        before != self.guest
    }
}

/// Decode a location object (`{lat, lon, city?}`).
pub fn parse_location(value: &Value) -> Option<Location> {
    if value.is_null() {
        return None;
    }
    match serde_json::from_value::<Location>(value.clone()) {
        Ok(location) => Some(location),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring undecodable location");
            None
        },
    }
}

fn location_request(payload: &Value) -> SyncOutcome {
    SyncOutcome {
        changed: false,
        weather_request: payload.get("location").and_then(parse_location),
    }
}

/// A usable text value: a non-empty string, or a number rendered as text.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn absent_dnd_never_overwrites() {
        let mut sync = StateSync::new();
        sync.apply_state(&json!({ "dnd": true }));
        sync.apply_state(&json!({}));
        assert!(sync.dnd());
    }

    #[test]
    fn non_boolean_dnd_is_ignored() {
        let mut sync = StateSync::new();
        sync.apply_state(&json!({ "dnd": "yes" }));
        assert!(!sync.dnd());
    }

    #[test]
    fn guest_fields_merge_across_payloads() {
        let mut sync = StateSync::new();
        sync.apply_state(&json!({ "guest": { "name": "Jane Doe" } }));
        sync.apply_state(&json!({ "guest": { "roomNumber": "504" } }));
        assert_eq!(sync.guest().name, "Jane Doe");
        assert_eq!(sync.guest().room, "504");
        assert_eq!(sync.guest().tier, "Gold");
    }

    #[test]
    fn empty_strings_keep_previous_value() {
        let mut sync = StateSync::new();
        let outcome = sync.apply_config(&json!({ "checkin": { "guestName": "", "roomNumber": 1204 } }));
        assert!(outcome.changed);
        assert_eq!(sync.guest().name, "Alexander Henderson");
        assert_eq!(sync.guest().room, "1204");
    }

    #[test]
    fn whitespace_is_not_empty() {
        let mut sync = StateSync::new();
        sync.apply_state(&json!({ "guest": { "name": " " } }));
        assert_eq!(sync.guest().name, " ");
    }

    #[test]
    fn alarms_replace_only_when_array() {
        let mut sync = StateSync::new();
        sync.apply_state(&json!({ "alarms": [{ "id": "a", "time": "07:00", "enabled": true }] }));
        assert_eq!(sync.alarms().len(), 1);

        sync.apply_state(&json!({ "alarms": "none" }));
        assert_eq!(sync.alarms().len(), 1);

        sync.apply_state(&json!({ "alarms": [] }));
        assert!(sync.alarms().is_empty());
    }

    #[test]
    fn location_yields_weather_request() {
        let mut sync = StateSync::new();
        let outcome = sync.apply_state(&json!({ "location": { "lat": 48.85, "lon": 2.35, "city": "Paris" } }));
        assert!(!outcome.changed);
        assert_eq!(
            outcome.weather_request,
            Some(Location { lat: 48.85, lon: 2.35, city: Some("Paris".into()) })
        );
    }

    #[test]
    fn checkin_requires_a_field() {
        let mut sync = StateSync::new();
        assert!(!sync.apply_checkin(&json!({ "other": 1 })));
        assert!(!sync.apply_checkin(&Value::Null));
    }

    #[test]
    fn checkin_signals_even_when_unchanged() {
        let mut sync = StateSync::new();
        assert!(sync.apply_checkin(&json!({ "guest": { "name": "Alexander Henderson" } })));
        assert_eq!(sync.guest(), &GuestState::default());
    }

    #[test]
    fn toggle_dnd_returns_new_value() {
        let mut sync = StateSync::new();
        assert!(sync.toggle_dnd());
        assert!(!sync.toggle_dnd());
    }
}
