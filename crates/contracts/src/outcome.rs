//! DispatchOutcome - terminal state of one dispatch unit

use serde::Serialize;

/// Terminal disposition of one payload for one destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// A write attempt succeeded
    Delivered,
    /// Every attempt failed; the payload went to the dead-letter store
    DeadLettered,
}

impl DispatchOutcome {
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}
