//! Driver trait for abstracting front-end I/O.
//!
//! The [`Driver`] trait decouples the application runtime from a specific
//! front end. Each front end implements the trait to provide input and
//! rendering, while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{App, AppEvent, KeyInput};

/// Abstracts front-end I/O for the application runtime.
///
/// Implementations provide input and rendering while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures the
/// same orchestration code runs in the terminal front end and in tests.
///
/// # Implementations
///
/// - **TUI**: crossterm for key events, ratatui for drawing
/// - **Tests**: scripted events and recorded renders
pub trait Driver: Send {
    /// Front-end error type.
    type Error: std::error::Error + Send + 'static;

    /// Poll for the next input event.
    ///
    /// Returns `None` when nothing happened within the driver's own polling
    /// interval. The future must be cancel-safe: the runtime drops it when
    /// another event source wins.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send;

    /// Render the application state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, app: &App) -> Result<(), Self::Error>;

    /// Front-end behavior for a key the launcher did not claim.
    ///
    /// Called before the key reaches the app, only when
    /// [`App::claims_key`] is `false`. A returned event replaces the key.
    fn unclaimed_key(&mut self, key: KeyInput) -> Option<AppEvent> {
        let _ = key;
        None
    }

    /// Release front-end resources.
    fn stop(&mut self);
}
