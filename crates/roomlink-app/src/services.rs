//! External collaborators the runtime consumes.
//!
//! The launcher core never fetches weather or makes sound itself; it asks
//! these traits, and each front end supplies implementations.

use async_trait::async_trait;
use roomlink_core::{Location, WeatherSnapshot};

/// Weather lookup by location.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Current weather at `location`. `None` keeps whatever is shown now.
    async fn weather(&self, location: &Location) -> Option<WeatherSnapshot>;
}

/// Alarm tone output.
pub trait AudioAlert: Send {
    /// Prepare output. Called on the first key press.
    fn init(&mut self);

    /// Start the tone. Calling it while playing has no effect.
    fn play(&mut self);

    /// Stop the tone.
    fn stop(&mut self);

    /// Whether the tone is playing.
    fn is_playing(&self) -> bool;
}

/// Detects whether the launcher runs on the hotel TV platform.
pub trait HostEnvironment {
    /// `true` on the TV platform, where rendering drops animations.
    fn is_host_platform(&self) -> bool;
}

/// Platform detection from what the launcher was started with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedHost {
    /// A native host channel was configured.
    pub host_channel: bool,
    /// Reported user agent.
    pub user_agent: String,
}

impl HostEnvironment for DetectedHost {
    fn is_host_platform(&self) -> bool {
        self.host_channel || self.user_agent.to_ascii_lowercase().contains("radix")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_match_is_case_insensitive() {
        let host = DetectedHost { host_channel: false, user_agent: "Mozilla/5.0 RADIX/2.1".into() };
        assert!(host.is_host_platform());
    }

    #[test]
    fn host_channel_alone_is_enough() {
        let host = DetectedHost { host_channel: true, user_agent: String::new() };
        assert!(host.is_host_platform());
        assert!(!DetectedHost::default().is_host_platform());
    }
}
