//! Host bridge
//!
//! Asynchronous request/response correlation with the native TV host, plus
//! delivery of unsolicited host events to any number of subscribers.
//!
//! # Architecture
//!
//! The bridge is an explicit object with an injected [`Transport`] and an
//! explicit `start`/`shutdown` lifecycle, so every test builds its own
//! isolated instance. Production wires it to a [`HostChannel`]; development
//! and tests use the in-memory [`MockHost`].
//!
//! # Components
//!
//! - [`Bridge`]: calls, commands, app launches and event subscriptions
//! - [`PendingRequests`]: outstanding calls keyed by correlation id
//! - [`Transport`]: the capability of carrying frames to the host
//! - [`HostChannel`]: line-delimited JSON over TCP
//! - [`MockHost`]: canned replies after a simulated latency

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod bridge;
mod error;
pub mod mock;
pub mod pending;
pub mod transport;

pub use bridge::{Bridge, BridgeConfig, DEFAULT_CALL_TIMEOUT, Subscription};
pub use error::{BridgeError, TransportError};
pub use mock::{DEFAULT_MOCK_LATENCY, MockHost, MockReply};
pub use pending::PendingRequests;
pub use transport::{HostChannel, Transport};
