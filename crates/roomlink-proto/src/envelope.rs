//! JSON envelope and message classification.
//!
//! Every message on the request/response channel is one JSON object with the
//! optional members `id`, `method`, `params`, `result` and `error`. The shape
//! decides what the message is:
//!
//! ```text
//!   id  method   meaning
//!   --  ------   -------
//!   x     x      Request   (launcher -> host)
//!   x     -      Response  (host -> launcher)
//!   -     x      Event     (host -> launcher, unsolicited)
//!   -     -      malformed
//! ```
//!
//! An empty string or `null` counts as absent, mirroring how the host side
//! tests these members for truthiness.
//!
//! # Invariants
//!
//! - An Event never carries an id: [`Envelope::event`] cannot set one and
//!   [`BridgeMessage::classify`] never yields an Event for an envelope that
//!   has one.
//! - A Response outcome is an error exactly when `error` is present and not
//!   `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    RequestId,
    error::{ProtocolError, Result},
    method::EventKind,
};

/// Raw wire envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Envelope {
    /// Correlation id (requests and responses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
    /// Method name (requests and events).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Method parameters (requests and events).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Success payload (responses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Failure payload (responses).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl Envelope {
    /// Build a request envelope.
    pub fn request(id: RequestId, method: impl Into<String>, params: Value) -> Self {
        Self { id: Some(id), method: Some(method.into()), params: Some(params), ..Self::default() }
    }

    /// Build a successful response envelope.
    pub fn reply(id: RequestId, result: Value) -> Self {
        Self { id: Some(id), result: Some(result), ..Self::default() }
    }

    /// Build a failed response envelope.
    pub fn failure(id: RequestId, error: Value) -> Self {
        Self { id: Some(id), error: Some(error), ..Self::default() }
    }

    /// Build an event envelope. Events never carry an id.
    pub fn event(method: impl Into<String>, params: Value) -> Self {
        Self { method: Some(method.into()), params: Some(params), ..Self::default() }
    }

    /// Serialize to a compact JSON string.
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a JSON string into an envelope.
    ///
    /// Stricter than plain deserialization: the input must be an object, and
    /// `id`/`method` must be strings when present. Empty strings and `null`
    /// are normalized to absent.
    pub fn decode(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(mut object) = value else {
            return Err(ProtocolError::NotAnObject);
        };

        let id = take_text(&mut object, "id").map_err(|()| ProtocolError::InvalidId)?;
        let method = take_text(&mut object, "method").map_err(|()| ProtocolError::InvalidMethod)?;

        Ok(Self {
            id: id.map(RequestId::from),
            method,
            params: take_present(&mut object, "params"),
            result: take_present(&mut object, "result"),
            error: take_present(&mut object, "error"),
        })
    }
}

/// Take a string member, treating `null` and `""` as absent.
fn take_text(object: &mut Map<String, Value>, key: &str) -> std::result::Result<Option<String>, ()> {
    match object.remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(()),
    }
}

/// Take a member, treating `null` as absent.
fn take_present(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    object.remove(key).filter(|v| !v.is_null())
}

/// An unsolicited host event.
#[derive(Debug, Clone, PartialEq)]
pub struct HostEvent {
    /// Event method, e.g. `ui.checkin`.
    pub method: String,
    /// Event parameters; `Value::Null` when the host sent none.
    pub params: Value,
}

impl HostEvent {
    /// Create an event.
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self { method: method.into(), params }
    }

    /// The recognized kind, if the launcher understands this event.
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_method(&self.method)
    }
}

/// Classified bridge message.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage {
    /// Launcher-issued call awaiting a response.
    Request {
        /// Correlation id.
        id: RequestId,
        /// Method to invoke.
        method: String,
        /// Parameters; an empty object when none were given.
        params: Value,
    },
    /// Host reply to an earlier request.
    Response {
        /// Correlation id of the request being answered.
        id: RequestId,
        /// `Ok(result)` or `Err(error payload)`.
        outcome: std::result::Result<Value, Value>,
    },
    /// Unsolicited host event.
    Event(HostEvent),
}

impl BridgeMessage {
    /// Classify an envelope by which members it carries.
    pub fn classify(envelope: Envelope) -> Result<Self> {
        let Envelope { id, method, params, result, error } = envelope;
        match (id, method) {
            (Some(id), Some(method)) => Ok(Self::Request {
                id,
                method,
                params: params.unwrap_or_else(|| Value::Object(Map::new())),
            }),
            (Some(id), None) => Ok(Self::Response { id, outcome: outcome(result, error) }),
            (None, Some(method)) => {
                Ok(Self::Event(HostEvent { method, params: params.unwrap_or(Value::Null) }))
            },
            (None, None) => Err(ProtocolError::Unroutable),
        }
    }

    /// Decode and classify a JSON string.
    pub fn decode(text: &str) -> Result<Self> {
        Self::classify(Envelope::decode(text)?)
    }

    /// Convert back into a wire envelope.
    pub fn into_envelope(self) -> Envelope {
        match self {
            Self::Request { id, method, params } => Envelope::request(id, method, params),
            Self::Response { id, outcome: Ok(result) } => Envelope::reply(id, result),
            Self::Response { id, outcome: Err(error) } => Envelope::failure(id, error),
            Self::Event(HostEvent { method, params }) => Envelope::event(method, params),
        }
    }

    /// Serialize to a compact JSON string.
    pub fn encode(self) -> Result<String> {
        self.into_envelope().encode()
    }
}

/// Inbound message as seen by the launcher side of the bridge.
///
/// Anything carrying an id is routed to the pending-request table, even if it
/// also names a method; the launcher serves no host-originated requests.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Route to the pending request with this id.
    Reply {
        /// Correlation id.
        id: RequestId,
        /// `Ok(result)` or `Err(error payload)`.
        outcome: std::result::Result<Value, Value>,
    },
    /// Fan out to event subscribers.
    Event(HostEvent),
}

impl Inbound {
    /// Decode one inbound JSON string.
    pub fn decode(text: &str) -> Result<Self> {
        let Envelope { id, method, params, result, error } = Envelope::decode(text)?;
        match (id, method) {
            (Some(id), _) => Ok(Self::Reply { id, outcome: outcome(result, error) }),
            (None, Some(method)) => {
                Ok(Self::Event(HostEvent { method, params: params.unwrap_or(Value::Null) }))
            },
            (None, None) => Err(ProtocolError::Unroutable),
        }
    }
}

fn outcome(result: Option<Value>, error: Option<Value>) -> std::result::Result<Value, Value> {
    match error {
        Some(error) => Err(error),
        None => Ok(result.unwrap_or(Value::Null)),
    }
}
