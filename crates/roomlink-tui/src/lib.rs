//! Terminal UI for the in-room launcher
//!
//! A thin shell over [`roomlink_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`roomlink_app::Runtime`].
//!
//! # Components
//!
//! - [`TerminalDriver`]: crossterm input and ratatui rendering
//! - [`LauncherConfig`]: TOML configuration with command-line overrides
//! - [`host::connect`]: host channel or mock host behind a started bridge
//! - [`weather`]: the static city table or Open-Meteo over HTTP
//! - [`TerminalBell`]: alarm tone on the terminal bell
//! - [`ui`]: the launcher screen and its overlays

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod audio;
pub mod config;
pub mod host;
pub mod terminal;
pub mod ui;
pub mod weather;

pub use audio::TerminalBell;
pub use config::{ConfigError, LauncherConfig, Overrides, WeatherSource};
pub use roomlink_app::{App, AppAction, AppEvent, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
pub use weather::{OpenMeteoWeather, StaticWeather, WeatherError};
