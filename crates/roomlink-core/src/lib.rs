//! Pure launcher logic
//!
//! State machines for the in-room launcher with no I/O, so the same code runs
//! under the terminal front end and in deterministic tests.
//!
//! # Components
//!
//! - [`focus`]: three-row navigation with clamped indices and per-row memory
//! - [`modal`]: the cyclic focus ring used by overlays
//! - [`sync`]: merges sparse host payloads into guest/weather/DND/alarm state
//! - [`alarm`]: `HH:MM` matching with once-per-minute firing
//! - [`catalog`]: service cards, app shortcuts and structured modal content
//! - [`env`]: time abstraction for tests and production

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod alarm;
pub mod catalog;
pub mod env;
pub mod focus;
pub mod modal;
pub mod state;
pub mod sync;

pub use alarm::{AlarmClock, AlarmTime, AlarmTimeError};
pub use catalog::{ModalContent, SERVICES, STREAMING_APPS, Service, ServiceId, StreamingApp};
pub use env::{Environment, SystemEnv};
pub use focus::{Direction, FOOTER_SLOTS, FocusState, FooterAction, Row, RowSizes};
pub use modal::{FocusRing, ModalControl, ModalOutcome, ModalState};
pub use state::{AlarmEntry, ForecastDay, GuestState, Location, ToastEntry, WeatherSnapshot};
pub use sync::{StateSync, SyncOutcome};
