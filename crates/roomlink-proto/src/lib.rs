//! Wire protocol for the in-room launcher bridge
//!
//! The launcher talks to the native TV host over a JSON-RPC-like envelope.
//! Requests carry a correlation id and a method, responses carry the same id
//! and a result or an error, and host-originated events carry a method but
//! never an id.
//!
//! # Components
//!
//! - [`Envelope`]: the raw JSON object as it appears on the wire
//! - [`BridgeMessage`]: the classified view (request, response, event)
//! - [`Inbound`]: what the launcher side does with a received line
//! - [`HostCommand`] and [`AppPackage`]: fire-and-forget host primitives
//! - [`OutboundFrame`]: one unit handed to a host transport

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod command;
pub mod envelope;
pub mod error;
pub mod id;
pub mod method;

pub use command::{AppPackage, HostCommand, OutboundFrame};
pub use envelope::{BridgeMessage, Envelope, HostEvent, Inbound};
pub use error::{ProtocolError, Result};
pub use id::RequestId;
