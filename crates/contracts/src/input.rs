//! InputUnit - the unit of work entering the system

use serde::{Deserialize, Serialize};

/// A tagged payload submitted by a caller.
///
/// Emptiness is checked by the validator, not here: an `InputUnit` can be
/// built from anything the ingress received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputUnit {
    /// Classification used to pick destinations
    pub tag: String,

    /// Text to deliver, written as one line per destination
    pub payload: String,
}

impl InputUnit {
    pub fn new(tag: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            payload: payload.into(),
        }
    }
}
