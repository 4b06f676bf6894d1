//! Application input events.
//!
//! This module defines [`AppEvent`], everything that drives the
//! [`crate::App`] state machine.
//!
//! Events originate from three sources:
//! - The remote control and the runtime's periodic ticks.
//! - The bootstrap sequence and host events relayed by the bridge.
//! - One-shot timers and weather lookups the app itself asked for.

use chrono::NaiveDateTime;
use roomlink_core::WeatherSnapshot;
use roomlink_proto::HostEvent;
use serde_json::Value;

use crate::{KeyInput, action::TimerId};

/// Events processed by the App state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Remote-control input.
    Key(KeyInput),

    /// Periodic clock tick carrying local wall-clock time.
    ClockTick(NaiveDateTime),

    /// Periodic alarm check carrying local wall-clock time.
    AlarmTick(NaiveDateTime),

    /// Unsolicited host event.
    Host(HostEvent),

    /// Cached preference snapshot found during bootstrap.
    CachedState(Value),

    /// Provisioning configuration fetched during bootstrap.
    Config(Value),

    /// Live room state fetched during bootstrap.
    State(Value),

    /// Every bootstrap step has finished or failed.
    BootstrapComplete,

    /// A weather lookup finished. `None` keeps the current snapshot.
    WeatherLoaded(Option<WeatherSnapshot>),

    /// A timer requested through [`crate::AppAction::Schedule`] elapsed.
    Timer(TimerId),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Leave the launcher.
    Quit,
}
