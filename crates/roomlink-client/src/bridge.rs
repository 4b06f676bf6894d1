//! The launcher side of the host bridge.
//!
//! [`Bridge`] correlates requests with responses, times calls out, fans host
//! events out to subscribers and sends fire-and-forget commands. It owns no
//! I/O of its own: frames go out through a [`Transport`] and raw inbound lines
//! come in through a channel handed to [`Bridge::start`] (or directly through
//! [`Bridge::handle_inbound`]).
//!
//! # Lifecycle
//!
//! ```text
//! new ──► start(inbound) ──► call / on_event / send_command ──► shutdown
//! ```
//!
//! After [`Bridge::shutdown`] every pending call has been rejected, every
//! subscriber dropped, and further calls fail immediately.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    sync::{
        Arc, Mutex, MutexGuard, PoisonError, Weak,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Duration,
};

use roomlink_core::Environment;
use roomlink_proto::{AppPackage, Envelope, HostCommand, HostEvent, Inbound, OutboundFrame, RequestId};
use serde_json::Value;
use tokio::{sync::mpsc, task::AbortHandle};

use crate::{
    error::BridgeError,
    pending::PendingRequests,
    transport::Transport,
};

/// How long a call waits for its response.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_millis(8000);

/// Bridge tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Time after which an unanswered call fails with
    /// [`BridgeError::Timeout`].
    pub call_timeout: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self { call_timeout: DEFAULT_CALL_TIMEOUT }
    }
}

type Handler = Arc<dyn Fn(&HostEvent) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_key: u64,
    handlers: Vec<(u64, Handler)>,
}

#[derive(Default)]
struct Shared {
    pending: Mutex<PendingRequests>,
    subscribers: Mutex<Subscribers>,
    pump: Mutex<Option<AbortHandle>>,
    seq: AtomicU64,
    closed: AtomicBool,
}

impl Shared {
    fn pending(&self) -> MutexGuard<'_, PendingRequests> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn subscribers(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pump(&self) -> MutexGuard<'_, Option<AbortHandle>> {
        self.pump.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Route one raw inbound line.
    fn dispatch(&self, text: &str) {
        match Inbound::decode(text) {
            Ok(Inbound::Reply { id, outcome }) => {
                if self.pending().resolve(&id, outcome) {
                    tracing::debug!(%id, "response matched pending call");
                } else {
                    tracing::debug!(%id, "dropping response with no pending call");
                }
            },
            Ok(Inbound::Event(event)) => {
                // Handlers run outside the lock so they may subscribe or
                // unsubscribe themselves.
                let handlers: Vec<Handler> =
                    self.subscribers().handlers.iter().map(|(_, h)| Arc::clone(h)).collect();
                tracing::debug!(method = %event.method, subscribers = handlers.len(), "host event");
                for handler in handlers {
                    handler(&event);
                }
            },
            Err(e) => tracing::debug!(error = %e, "dropping malformed inbound message"),
        }
    }
}

/// Removes a call's pending entry however the call ends, including when the
/// caller drops the future.
struct PendingGuard<'a> {
    shared: &'a Shared,
    id: RequestId,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.shared.pending().remove(&self.id);
    }
}

/// Handle to the host bridge. Clones share the same pending table and
/// subscribers.
pub struct Bridge<E: Environment> {
    env: E,
    transport: Arc<dyn Transport>,
    config: BridgeConfig,
    shared: Arc<Shared>,
}

impl<E: Environment> Clone for Bridge<E> {
    fn clone(&self) -> Self {
        Self {
            env: self.env.clone(),
            transport: Arc::clone(&self.transport),
            config: self.config,
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<E: Environment> Bridge<E> {
    /// Create a bridge over `transport`. Nothing is read until
    /// [`Self::start`].
    pub fn new(env: E, transport: Arc<dyn Transport>, config: BridgeConfig) -> Self {
        Self { env, transport, config, shared: Arc::new(Shared::default()) }
    }

    /// Configuration in effect.
    pub fn config(&self) -> BridgeConfig {
        self.config
    }

    /// Mint the next correlation id.
    fn next_id(&self) -> RequestId {
        let seq = self.shared.seq.fetch_add(1, Ordering::Relaxed) + 1;
        RequestId::new(self.env.unix_millis(), seq)
    }

    /// Send a request and wait for its response.
    ///
    /// Resolves with the response's `result` (`null` when absent). Fails with
    /// [`BridgeError::Host`] when the response carries an error,
    /// [`BridgeError::Timeout`] when nothing arrives within the call timeout,
    /// and [`BridgeError::Shutdown`] when the bridge shuts down first. A
    /// response that arrives after the timeout is dropped.
    pub async fn call(&self, method: &str, params: Value) -> Result<Value, BridgeError> {
        if self.shared.closed.load(Ordering::Acquire) {
            return Err(BridgeError::Shutdown);
        }

        let id = self.next_id();
        let line = Envelope::request(id.clone(), method, params).encode()?;
        let reply = self.shared.pending().insert(id.clone(), method);
        let _guard = PendingGuard { shared: &self.shared, id: id.clone() };

        self.transport.deliver(OutboundFrame::PostMessage(line))?;
        tracing::debug!(%id, method, "bridge call sent");

        tokio::select! {
            outcome = reply => outcome.unwrap_or(Err(BridgeError::Shutdown)),
            () = self.env.sleep(self.config.call_timeout) => {
                tracing::warn!(%id, method, "bridge call timed out");
                Err(BridgeError::Timeout { method: method.to_owned() })
            },
        }
    }

    /// Send a fire-and-forget host command.
    pub fn send_command(&self, command: HostCommand) -> Result<(), BridgeError> {
        tracing::info!(class = command.class_name(), "sending host command");
        self.transport.deliver(OutboundFrame::command(command))?;
        Ok(())
    }

    /// Ask the host to launch an app.
    pub fn launch_app(&self, package: AppPackage) -> Result<(), BridgeError> {
        tracing::info!(package = package.package_name(), "launching app");
        self.transport.deliver(OutboundFrame::launch(package))?;
        Ok(())
    }

    /// Register an event handler. It runs once per inbound event until the
    /// returned [`Subscription`] is detached or dropped.
    pub fn on_event<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&HostEvent) + Send + Sync + 'static,
    {
        let mut subscribers = self.shared.subscribers();
        subscribers.next_key += 1;
        let key = subscribers.next_key;
        subscribers.handlers.push((key, Arc::new(handler)));
        Subscription { shared: Arc::downgrade(&self.shared), key }
    }

    /// Route one raw inbound line: responses to pending calls, events to
    /// subscribers, anything else nowhere.
    pub fn handle_inbound(&self, text: &str) {
        self.shared.dispatch(text);
    }

    /// Spawn the task that feeds `inbound` lines through
    /// [`Self::handle_inbound`]. Starting again replaces the previous pump.
    pub fn start(&self, mut inbound: mpsc::UnboundedReceiver<String>) {
        let shared = Arc::clone(&self.shared);
        let pump = tokio::spawn(async move {
            while let Some(line) = inbound.recv().await {
                shared.dispatch(&line);
            }
            tracing::debug!("bridge inbound channel closed");
        });

        if let Some(previous) = self.shared.pump().replace(pump.abort_handle()) {
            previous.abort();
        }
        tracing::info!("bridge started");
    }

    /// Stop the inbound pump, reject pending calls and drop all subscribers.
    pub fn shutdown(&self) {
        self.shared.closed.store(true, Ordering::Release);
        if let Some(pump) = self.shared.pump().take() {
            pump.abort();
        }
        let rejected = self.shared.pending().reject_all();
        self.shared.subscribers().handlers.clear();
        tracing::info!(rejected, "bridge shut down");
    }

    /// Number of calls awaiting a response.
    pub fn pending_count(&self) -> usize {
        self.shared.pending().len()
    }

    /// Number of live event subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.subscribers().handlers.len()
    }
}

/// Keeps an event handler registered. Dropping it unsubscribes.
#[must_use = "dropping a subscription unsubscribes immediately"]
pub struct Subscription {
    shared: Weak<Shared>,
    key: u64,
}

impl Subscription {
    /// Unsubscribe now.
    pub fn detach(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.subscribers().handlers.retain(|(key, _)| *key != self.key);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("key", &self.key).finish_non_exhaustive()
    }
}
