//! Request correlation ids.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque correlation token pairing a request with its response.
///
/// Ids minted by the launcher look like `req-{unix_millis}-{seq}`. Ids seen on
/// inbound traffic are accepted verbatim, whatever their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Mint an id from a wall-clock timestamp and a per-bridge sequence number.
    ///
    /// The sequence number alone guarantees uniqueness within one bridge; the
    /// timestamp keeps ids distinct across process restarts.
    pub fn new(unix_millis: u64, seq: u64) -> Self {
        Self(format!("req-{unix_millis}-{seq}"))
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequestId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RequestId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
