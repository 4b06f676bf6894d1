//! Application layer for the in-room launcher
//!
//! Pure state machine and generic runtime for the launcher, enabling
//! deterministic testing with the same code that runs on the TV.
//!
//! # Components
//!
//! - [`App`]: launcher state machine (key routing, overlays, toasts, alarms)
//! - [`bootstrap()`]: start-up sequence against the host bridge
//! - [`WeatherService`], [`AudioAlert`], [`HostEnvironment`]: collaborators
//! - [`Driver`]: Trait for front-end I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bootstrap;
mod driver;
mod event;
mod input;
mod runtime;
mod services;
mod state;

pub use action::{AppAction, TimerId};
pub use app::App;
pub use bootstrap::{SETTLE_DELAY, bootstrap};
pub use driver::Driver;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::{ALARM_TICK, CLOCK_TICK, Collaborators, Runtime};
pub use services::{AudioAlert, DetectedHost, HostEnvironment, WeatherService};
pub use state::{
    LauncherOptions, PRIVACY_ENTRIES, PrivacyEntry, WELCOME_FADE_FOR, WELCOME_VISIBLE_FOR,
    WelcomeBanner,
};
