//! Outstanding request table.
//!
//! One entry per request id, created when a call is sent and removed exactly
//! once: by the matching response, by the call's timeout, by the caller
//! dropping the call, or by shutdown. Whatever comes second finds nothing and
//! does nothing, which is how late responses get dropped.

use std::collections::HashMap;

use roomlink_proto::RequestId;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::error::BridgeError;

/// What a pending call eventually receives.
pub type Reply = Result<Value, BridgeError>;

#[derive(Debug)]
struct Pending {
    method: String,
    reply: oneshot::Sender<Reply>,
}

/// Pending requests keyed by correlation id.
#[derive(Debug, Default)]
pub struct PendingRequests {
    entries: HashMap<RequestId, Pending>,
}

impl PendingRequests {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request and return the receiver its reply will arrive on.
    ///
    /// Ids are unique for the lifetime of a bridge, so an existing entry is
    /// never displaced in practice; if one were, its caller would see
    /// [`BridgeError::Shutdown`].
    pub fn insert(&mut self, id: RequestId, method: &str) -> oneshot::Receiver<Reply> {
        let (reply, rx) = oneshot::channel();
        self.entries.insert(id, Pending { method: method.to_owned(), reply });
        rx
    }

    /// Complete the request `id` with a host response.
    ///
    /// Returns `false` when no such request is pending (late or unknown
    /// response).
    pub fn resolve(&mut self, id: &RequestId, outcome: Result<Value, Value>) -> bool {
        let Some(Pending { method, reply }) = self.entries.remove(id) else {
            return false;
        };
        let reply_value = outcome.map_err(|error| BridgeError::Host { method, error });
        // The caller may have stopped waiting; nothing to do then.
        let _ = reply.send(reply_value);
        true
    }

    /// Forget the request `id` without replying. Returns its method if it was
    /// still pending.
    pub fn remove(&mut self, id: &RequestId) -> Option<String> {
        self.entries.remove(id).map(|pending| pending.method)
    }

    /// Reject every pending request with [`BridgeError::Shutdown`]. Returns
    /// how many there were.
    pub fn reject_all(&mut self) -> usize {
        let count = self.entries.len();
        for (_, pending) in self.entries.drain() {
            let _ = pending.reply.send(Err(BridgeError::Shutdown));
        }
        count
    }

    /// Number of outstanding requests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is outstanding.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
