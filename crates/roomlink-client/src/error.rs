//! Bridge and transport errors.

use roomlink_proto::ProtocolError;
use serde_json::Value;
use thiserror::Error;

/// Failures handing a frame to the host.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Could not reach the host.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The host channel has been closed or stopped.
    #[error("host channel closed")]
    Closed,

    /// Frame could not be encoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Why a bridge call did not produce a result.
///
/// Callers treat every variant as "feature unavailable" and fall back to
/// whatever state they already have.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// No response arrived within the call timeout.
    #[error("Timeout waiting for {method}")]
    Timeout {
        /// Method of the request that timed out.
        method: String,
    },

    /// The host answered with an error payload.
    #[error("host rejected {method}: {error}")]
    Host {
        /// Method of the rejected request.
        method: String,
        /// The `error` member of the response, uninterpreted.
        error: Value,
    },

    /// The request could not be handed to the host.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The request could not be encoded.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The bridge was shut down while the call was outstanding.
    #[error("bridge shut down")]
    Shutdown,
}

impl BridgeError {
    /// Returns true if retrying the same call later might succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_names_method() {
        let err = BridgeError::Timeout { method: "state.get".into() };
        assert_eq!(err.to_string(), "Timeout waiting for state.get");
    }

    #[test]
    fn timeouts_are_transient() {
        assert!(BridgeError::Timeout { method: "config.get".into() }.is_transient());
        assert!(BridgeError::Transport(TransportError::Closed).is_transient());
    }

    #[test]
    fn host_errors_and_shutdown_are_not_transient() {
        let host = BridgeError::Host { method: "pref.get".into(), error: Value::from("denied") };
        assert!(!host.is_transient());
        assert!(!BridgeError::Shutdown.is_transient());
    }
}
