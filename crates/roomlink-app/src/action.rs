//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use std::time::Duration;

use roomlink_core::{Location, ServiceId};
use roomlink_proto::{AppPackage, HostCommand};

/// One-shot timers the app can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// The toast with this sequence number has been up long enough.
    ToastExpiry(u64),
    /// The welcome banner should start fading.
    WelcomeFade,
    /// The welcome banner should disappear.
    WelcomeHide,
}

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Send a fire-and-forget host command.
    SendCommand(HostCommand),

    /// Launch an app on the TV.
    LaunchApp(AppPackage),

    /// Look up weather for a location and report back with
    /// [`crate::AppEvent::WeatherLoaded`].
    FetchWeather(Location),

    /// Start the alarm tone. Idempotent.
    PlayAlarm,

    /// Stop the alarm tone.
    StopAlarm,

    /// Prepare audio output; the first key press unlocks it.
    InitAudio,

    /// Deliver [`crate::AppEvent::Timer`] after a delay.
    Schedule {
        /// Which timer.
        timer: TimerId,
        /// Delay.
        after: Duration,
    },

    /// The guest confirmed a modal selection.
    ConfirmSelection {
        /// Service the modal described.
        service: ServiceId,
        /// Label of the selected item, if any.
        item: Option<String>,
    },
}
