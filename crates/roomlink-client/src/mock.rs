//! In-memory host for development and tests.
//!
//! Answers a fixed set of methods with canned payloads after a simulated
//! latency, records every command and app launch, and lets tests override
//! replies or inject events.

#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use roomlink_proto::{Envelope, OutboundFrame, method};
use serde_json::{Value, json};
use tokio::sync::mpsc;

use crate::{error::TransportError, transport::Transport};

/// Simulated host round-trip time.
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(100);

/// How the mock answers a method.
#[derive(Debug, Clone, PartialEq)]
pub enum MockReply {
    /// Respond with this `result`.
    Result(Value),
    /// Respond with this `error`.
    Error(Value),
    /// Never respond.
    Silent,
}

#[derive(Debug, Default)]
struct MockState {
    overrides: HashMap<String, MockReply>,
    requests: Vec<String>,
    commands: Vec<String>,
    launches: Vec<String>,
}

/// In-memory stand-in for the native host.
#[derive(Debug, Clone)]
pub struct MockHost {
    latency: Duration,
    state: Arc<Mutex<MockState>>,
    inbound: mpsc::UnboundedSender<String>,
}

impl MockHost {
    /// Create a mock host and the receiver carrying its replies and events.
    pub fn new(latency: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (inbound, rx) = mpsc::unbounded_channel();
        let host = Self { latency, state: Arc::new(Mutex::new(MockState::default())), inbound };
        (host, rx)
    }

    /// Override the reply for `method`.
    pub fn set_reply(&self, method: impl Into<String>, reply: MockReply) {
        self.lock().overrides.insert(method.into(), reply);
    }

    /// Push a host event to the launcher immediately.
    pub fn emit_event(&self, method: impl Into<String>, params: Value) {
        match Envelope::event(method, params).encode() {
            Ok(line) => self.inject(line),
            Err(e) => tracing::warn!(error = %e, "mock host failed to encode event"),
        }
    }

    /// Push a raw inbound line, well-formed or not.
    pub fn inject(&self, line: impl Into<String>) {
        if self.inbound.send(line.into()).is_err() {
            tracing::debug!("mock host inbound channel closed");
        }
    }

    /// Methods requested so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    /// Command classes received so far.
    pub fn commands(&self) -> Vec<String> {
        self.lock().commands.clone()
    }

    /// Packages launched so far.
    pub fn launches(&self) -> Vec<String> {
        self.lock().launches.clone()
    }

    fn reply_for(&self, method: &str) -> MockReply {
        self.lock().overrides.get(method).cloned().unwrap_or_else(|| canned_reply(method))
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer(&self, request: &str) -> Result<(), TransportError> {
        let envelope = match Envelope::decode(request) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(error = %e, "mock host ignoring undecodable request");
                return Ok(());
            },
        };
        let (Some(id), Some(method)) = (envelope.id, envelope.method) else {
            tracing::debug!("mock host ignoring message that is not a request");
            return Ok(());
        };

        self.lock().requests.push(method.clone());
        let response = match self.reply_for(&method) {
            MockReply::Result(result) => Envelope::reply(id, result),
            MockReply::Error(error) => Envelope::failure(id, error),
            MockReply::Silent => {
                tracing::debug!(%method, "mock host staying silent");
                return Ok(());
            },
        };

        let line = response.encode()?;
        let inbound = self.inbound.clone();
        let latency = self.latency;
        tokio::spawn(async move {
            tokio::time::sleep(latency).await;
            // The bridge may have shut down in the meantime.
            let _ = inbound.send(line);
        });
        Ok(())
    }
}

impl Transport for MockHost {
    fn deliver(&self, frame: OutboundFrame) -> Result<(), TransportError> {
        match frame {
            OutboundFrame::PostMessage(request) => self.answer(&request),
            OutboundFrame::DoCommand(document) => {
                let class = serde_json::from_str::<Value>(&document)
                    .ok()
                    .and_then(|doc| doc["command"]["@class"].as_str().map(str::to_owned))
                    .unwrap_or(document);
                tracing::info!(%class, "mock host received command");
                self.lock().commands.push(class);
                Ok(())
            },
            OutboundFrame::LaunchApp(package) => {
                tracing::info!(%package, "mock host launching app");
                self.lock().launches.push(package);
                Ok(())
            },
        }
    }
}

/// Payloads a freshly provisioned room would return.
fn canned_reply(method_name: &str) -> MockReply {
    let result = match method_name {
        method::CAPABILITIES => json!({ "bridge": "json-rpc", "version": "1.0.0" }),
        method::CONFIG_GET => {
            json!({ "checkin": { "guestName": "Alexander Henderson", "roomNumber": "802" } })
        },
        method::STATE_GET => {
            json!({ "guest": { "name": "Alexander Henderson", "roomNumber": "802" } })
        },
        _ => json!({ "ok": true }),
    };
    MockReply::Result(result)
}
