//! Terminal bell as the alarm tone.

#![allow(clippy::disallowed_types, reason = "Synchronous writes only")]

use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use roomlink_app::AudioAlert;
use tokio::{runtime::Handle, task::JoinHandle};

const BELL: &[u8] = b"\x07";

/// Gap between bells while the alarm plays.
pub const BEEP_INTERVAL: Duration = Duration::from_millis(300);

/// [`AudioAlert`] that rings the terminal bell.
///
/// Silent until [`AudioAlert::init`] has run. While playing, the bell rings
/// every [`BEEP_INTERVAL`] on a background task until stopped.
pub struct TerminalBell<W: Write + Send + 'static> {
    out: Arc<Mutex<W>>,
    ready: bool,
    beeper: Option<JoinHandle<()>>,
}

impl TerminalBell<io::Stdout> {
    /// Bell on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + 'static> TerminalBell<W> {
    /// Bell that writes to `out`.
    pub fn new(out: W) -> Self {
        Self { out: Arc::new(Mutex::new(out)), ready: false, beeper: None }
    }

    /// Whether [`AudioAlert::init`] ran.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Inspect the underlying writer.
    pub fn with_writer<R>(&self, f: impl FnOnce(&W) -> R) -> R {
        f(&self.out.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

fn ring<W: Write>(out: &Mutex<W>) {
    let mut out = out.lock().unwrap_or_else(PoisonError::into_inner);
    if let Err(e) = out.write_all(BELL).and_then(|()| out.flush()) {
        tracing::debug!(error = %e, "terminal bell failed");
    }
}

impl<W: Write + Send + 'static> AudioAlert for TerminalBell<W> {
    fn init(&mut self) {
        self.ready = true;
    }

    fn play(&mut self) {
        if !self.ready {
            tracing::debug!("alarm tone skipped; audio not initialised");
            return;
        }
        if self.beeper.is_some() {
            return;
        }
        let Ok(handle) = Handle::try_current() else {
            ring(&self.out);
            return;
        };
        let out = Arc::clone(&self.out);
        self.beeper = Some(handle.spawn(async move {
            loop {
                ring(&out);
                tokio::time::sleep(BEEP_INTERVAL).await;
            }
        }));
    }

    fn stop(&mut self) {
        if let Some(beeper) = self.beeper.take() {
            beeper.abort();
        }
    }

    fn is_playing(&self) -> bool {
        self.beeper.is_some()
    }
}

impl<W: Write + Send + 'static> Drop for TerminalBell<W> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::sleep;

    use super::*;

    fn rings(bell: &TerminalBell<Vec<u8>>) -> usize {
        bell.with_writer(Vec::len)
    }

    #[tokio::test(start_paused = true)]
    async fn silent_until_initialised() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play();
        sleep(Duration::from_secs(1)).await;
        assert!(!bell.is_playing());
        assert_eq!(rings(&bell), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn repeats_until_stopped() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.init();
        bell.play();
        bell.play();
        assert!(bell.is_playing());

        sleep(BEEP_INTERVAL * 2 + Duration::from_millis(50)).await;
        assert_eq!(rings(&bell), 3);

        bell.stop();
        sleep(Duration::from_secs(2)).await;
        assert!(!bell.is_playing());
        assert_eq!(rings(&bell), 3);
    }

    #[test]
    fn outside_a_runtime_rings_once() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.init();
        bell.play();
        assert_eq!(rings(&bell), BELL.len());
        assert!(!bell.is_playing());
    }

    #[test]
    fn init_marks_ready() {
        let mut bell = TerminalBell::new(Vec::new());
        assert!(!bell.is_ready());
        bell.init();
        assert!(bell.is_ready());
        assert!(!bell.is_playing());
    }
}
