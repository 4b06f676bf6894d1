//! Host connection setup.
//!
//! Picks the transport from configuration: a TCP host channel when an
//! address is configured, otherwise the in-memory mock host. Either way the
//! bridge comes back already started.

use std::sync::Arc;

use roomlink_app::DetectedHost;
use roomlink_client::{Bridge, BridgeConfig, HostChannel, MockHost, TransportError};
use roomlink_core::Environment;

use crate::config::LauncherConfig;

/// A started bridge plus what was learned about the platform.
pub struct HostLink<E: Environment> {
    /// Started bridge.
    pub bridge: Bridge<E>,
    /// Platform detection input.
    pub detected: DetectedHost,
}

/// Connect to the configured host.
///
/// # Errors
///
/// Returns [`TransportError::Connection`] when a host address is configured
/// and nothing accepts the connection.
pub async fn connect<E: Environment>(
    env: E,
    config: &LauncherConfig,
) -> Result<HostLink<E>, TransportError> {
    let bridge_config = BridgeConfig { call_timeout: config.bridge.timeout() };

    let (bridge, host_channel) = match &config.bridge.host {
        Some(addr) => {
            let (channel, inbound) = HostChannel::connect(addr).await?;
            let bridge = Bridge::new(env, Arc::new(channel), bridge_config);
            bridge.start(inbound);
            (bridge, true)
        },
        None => {
            let (mock, inbound) = MockHost::new(config.bridge.mock_latency());
            tracing::info!(latency = ?config.bridge.mock_latency(), "using mock host");
            let bridge = Bridge::new(env, Arc::new(mock), bridge_config);
            bridge.start(inbound);
            (bridge, false)
        },
    };

    let detected =
        DetectedHost { host_channel, user_agent: config.launcher.user_agent.clone() };
    Ok(HostLink { bridge, detected })
}
