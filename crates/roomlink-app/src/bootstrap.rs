//! Start-up sequence.
//!
//! Asks the host for everything the launcher needs, in a fixed order, and
//! relays each answer to the app as an event. Later answers layer on top of
//! earlier ones:
//!
//! ```text
//! settle ─► system.capabilities ─► pref.get(state.changed) ─► config.get ─► state.get ─► complete
//! ```
//!
//! Every step tolerates failure. A failed step is logged and skipped; the
//! sequence always finishes with [`AppEvent::BootstrapComplete`], so the app
//! can fall back to default weather.

use std::time::Duration;

use roomlink_client::{Bridge, BridgeError};
use roomlink_core::Environment;
use roomlink_proto::method;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::Level;

use crate::AppEvent;

/// Delay before the first request, giving the host time to settle.
pub const SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Run the bootstrap sequence, sending results to `events`.
pub async fn bootstrap<E: Environment>(
    bridge: &Bridge<E>,
    env: &E,
    events: &mpsc::UnboundedSender<AppEvent>,
) {
    env.sleep(SETTLE_DELAY).await;

    if let Some(capabilities) = step(bridge, method::CAPABILITIES, json!({})).await {
        tracing::info!(%capabilities, "host capabilities");
    }

    let cached = step(bridge, method::PREF_GET, json!({ "key": method::CACHED_STATE_KEY })).await;
    if let Some(value) = cached.as_ref().and_then(|pref| pref.get("value")).filter(|v| !v.is_null()) {
        send(events, AppEvent::CachedState(value.clone()));
    }

    if let Some(config) = step(bridge, method::CONFIG_GET, json!({})).await {
        send(events, AppEvent::Config(config));
    }

    if let Some(state) = step(bridge, method::STATE_GET, json!({})).await {
        send(events, AppEvent::State(state));
    }

    send(events, AppEvent::BootstrapComplete);
}

async fn step<E: Environment>(bridge: &Bridge<E>, name: &str, params: Value) -> Option<Value> {
    match bridge.call(name, params).await {
        Ok(value) => Some(value),
        Err(e) => {
            if failure_level(&e) == Level::WARN {
                tracing::warn!(method = name, error = %e, "bootstrap step failed");
            } else {
                tracing::debug!(method = name, error = %e, "bootstrap step unavailable");
            }
            None
        },
    }
}

/// A host that rejects a method just lacks the feature. Timeouts and
/// transport failures point at the channel itself.
fn failure_level(error: &BridgeError) -> Level {
    if error.is_transient() { Level::WARN } else { Level::DEBUG }
}

fn send(events: &mpsc::UnboundedSender<AppEvent>, event: AppEvent) {
    if events.send(event).is_err() {
        tracing::debug!("bootstrap result dropped; runtime is gone");
    }
}
