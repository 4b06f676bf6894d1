//! Terminal driver for the TUI.
//!
//! Implements the [`Driver`] trait for terminal I/O using crossterm for
//! keyboard events and ratatui for rendering. The host connection is owned by
//! the bridge, not by the driver.

use std::{
    future::Future,
    io::{self, Stdout, stdout},
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use roomlink_app::{App, AppEvent, Driver, KeyInput};
use thiserror::Error;

use crate::ui;

/// How long one poll waits for terminal input before yielding.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal driver errors.
#[derive(Debug, Error)]
pub enum TerminalError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Terminal driver implementing the [`Driver`] trait.
///
/// Enters raw mode and the alternate screen on creation and restores the
/// terminal when dropped.
pub struct TerminalDriver {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    event_stream: EventStream,
}

impl TerminalDriver {
    /// Create a new terminal driver.
    pub fn new() -> Result<Self, TerminalError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(Self { terminal, event_stream: EventStream::new() })
    }

    /// Current terminal size as (columns, rows).
    pub fn size(&self) -> Result<(u16, u16), TerminalError> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }
}

/// Translate a crossterm key press into an app event.
///
/// Ctrl+C quits. Everything else is classified by the same key names a
/// TV remote reports, so Escape and Backspace are Back and Enter is Select.
pub fn convert_key(key: KeyEvent) -> Option<AppEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(AppEvent::Quit);
    }

    let name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "ArrowUp".into(),
        KeyCode::Down => "ArrowDown".into(),
        KeyCode::Left => "ArrowLeft".into(),
        KeyCode::Right => "ArrowRight".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Escape".into(),
        KeyCode::Backspace => "Backspace".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        _ => return None,
    };

    match KeyInput::from_key_name(&name, None) {
        KeyInput::Other => None,
        input => Some(AppEvent::Key(input)),
    }
}

/// Terminal behavior for a key the launcher left unclaimed: `q` quits.
pub fn fallback_key(key: KeyInput) -> Option<AppEvent> {
    match key {
        KeyInput::Char('q') => Some(AppEvent::Quit),
        _ => None,
    }
}

impl Driver for TerminalDriver {
    type Error = TerminalError;

    fn poll_event(&mut self) -> impl Future<Output = Result<Option<AppEvent>, Self::Error>> + Send {
        async move {
            tokio::select! {
                biased;

                maybe_event = self.event_stream.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) => Ok(convert_key(key)),
                    Some(Ok(Event::Resize(cols, rows))) => Ok(Some(AppEvent::Resize(cols, rows))),
                    Some(Err(e)) => Err(TerminalError::Io(e)),
                    // Input closed: nothing more will ever arrive.
                    None => Ok(Some(AppEvent::Quit)),
                    Some(Ok(_)) => Ok(None),
                },

                () = tokio::time::sleep(POLL_INTERVAL) => Ok(None),
            }
        }
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        self.terminal.draw(|frame| ui::render(frame, app))?;
        Ok(())
    }

    fn unclaimed_key(&mut self, key: KeyInput) -> Option<AppEvent> {
        fallback_key(key)
    }

    fn stop(&mut self) {
        let _ = self.terminal.show_cursor();
    }
}

impl Drop for TerminalDriver {
    fn drop(&mut self) {
        self.stop();
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
