//! Method and event names understood by the launcher.
//!
//! Outbound request methods and inbound event methods share the same string
//! namespace on the wire but are never interchangeable: the launcher only
//! issues the first group and only reacts to the second.

/// Host capability probe, issued first during bootstrap.
pub const CAPABILITIES: &str = "system.capabilities";

/// Read a persisted preference by key.
pub const PREF_GET: &str = "pref.get";

/// Read the provisioning configuration (check-in data, location).
pub const CONFIG_GET: &str = "config.get";

/// Read the live room state (guest, DND, weather, alarms, location).
pub const STATE_GET: &str = "state.get";

/// Preference key under which the host caches the last `state.changed` body.
pub const CACHED_STATE_KEY: &str = "state.changed";

/// Host-originated event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Partial state update, merged like a `state.get` result.
    StateChanged,
    /// A guest checked in; carries guest name and/or room number.
    CheckIn,
    /// The device location changed; carries `lat`, `lon` and optionally `city`.
    LocationUpdate,
    /// The host asks the launcher to show a notification.
    Toast,
}

impl EventKind {
    /// Wire name of this event.
    pub const fn method(self) -> &'static str {
        match self {
            Self::StateChanged => "state.changed",
            Self::CheckIn => "ui.checkin",
            Self::LocationUpdate => "location.update",
            Self::Toast => "ui.toast",
        }
    }

    /// Recognize an event method. Unknown methods yield `None`.
    pub fn from_method(method: &str) -> Option<Self> {
        match method {
            "state.changed" => Some(Self::StateChanged),
            "ui.checkin" => Some(Self::CheckIn),
            "location.update" => Some(Self::LocationUpdate),
            "ui.toast" => Some(Self::Toast),
            _ => None,
        }
    }
}
