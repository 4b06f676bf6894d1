//! Overlay and presentation state owned by the app.

use std::time::Duration;

use roomlink_proto::HostCommand;

/// Time the welcome banner stays fully visible after start.
pub const WELCOME_VISIBLE_FOR: Duration = Duration::from_millis(3000);

/// Duration of the welcome banner's fade-out.
pub const WELCOME_FADE_FOR: Duration = Duration::from_millis(700);

/// Welcome banner lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WelcomeBanner {
    /// Fully shown.
    #[default]
    Visible,
    /// Fading out; hidden once [`WELCOME_FADE_FOR`] elapses.
    Fading,
    /// Gone for good.
    Hidden,
}

/// One entry of the privacy menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacyEntry {
    /// Menu text.
    pub label: &'static str,
    /// Command sent when the entry is selected.
    pub command: HostCommand,
}

/// Privacy menu entries in display order.
pub const PRIVACY_ENTRIES: [PrivacyEntry; 2] = [
    PrivacyEntry { label: "Terms of Service", command: HostCommand::TermsOfService },
    PrivacyEntry { label: "Usage & Diagnostics", command: HostCommand::UsageDiagnostics },
];

/// Start-up options for [`crate::App`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LauncherOptions {
    /// Show the welcome splash until the first key press.
    pub show_splash: bool,
    /// Running on the hotel TV platform; front ends drop animations.
    pub low_motion: bool,
}

impl Default for LauncherOptions {
    fn default() -> Self {
        Self { show_splash: true, low_motion: false }
    }
}
