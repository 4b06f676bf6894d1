//! Fire-and-forget host primitives.
//!
//! Besides the request/response envelope, the host exposes two one-way
//! primitives: `doCommand`, which takes a JSON document naming a command
//! class, and `launchApp`, which takes an Android package name. Neither has a
//! reply.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Result;

/// Commands the launcher can send to the hotel platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostCommand {
    /// Start an express checkout.
    Checkout,
    /// Open the casting receiver.
    Cast,
    /// Show the terms of service.
    TermsOfService,
    /// Show the usage and diagnostics consent screen.
    UsageDiagnostics,
}

impl HostCommand {
    /// Fully-qualified command class understood by the host.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Checkout => "com.viso.entities.commands.CommandGB2BCheckout",
            Self::Cast => "com.viso.entities.commands.CommandGB2BCast",
            Self::TermsOfService => "com.viso.entities.commands.CommandGB2BTos",
            Self::UsageDiagnostics => "com.viso.entities.commands.CommandGB2BUsageDiagnostics",
        }
    }

    /// The `doCommand` argument: `{"command":{"@class":CLASS}}`.
    pub fn to_json(self) -> String {
        json!({ "command": { "@class": self.class_name() } }).to_string()
    }
}

/// Apps the launcher can start on the TV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppPackage {
    /// Netflix
    Netflix,
    /// The TV vendor's live TV app
    LiveTv,
    /// Disney+
    DisneyPlus,
    /// YouTube for Android TV
    YouTube,
    /// Prime Video
    PrimeVideo,
}

impl AppPackage {
    /// Android package name passed to `launchApp`.
    pub const fn package_name(self) -> &'static str {
        match self {
            Self::Netflix => "com.netflix.ninja",
            Self::LiveTv => "com.tcl.tv",
            Self::DisneyPlus => "com.disney.disneyplus",
            Self::YouTube => "com.google.android.youtube.tv",
            Self::PrimeVideo => "com.amazon.amazonvideo.livingroom",
        }
    }
}

/// One unit of outbound traffic handed to a transport.
///
/// On a line-oriented host channel each frame is written as a single JSON
/// object keyed by the host primitive, e.g. `{"launchApp":"com.tcl.tv"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutboundFrame {
    /// A serialized [`crate::Envelope`] for the request/response channel.
    PostMessage(String),
    /// A serialized command document.
    DoCommand(String),
    /// An Android package name.
    LaunchApp(String),
}

impl OutboundFrame {
    /// Frame carrying a host command.
    pub fn command(command: HostCommand) -> Self {
        Self::DoCommand(command.to_json())
    }

    /// Frame launching an app.
    pub fn launch(package: AppPackage) -> Self {
        Self::LaunchApp(package.package_name().to_owned())
    }

    /// Encode for a line-oriented channel (no trailing newline).
    pub fn encode_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
