//! Request and response bodies

use contracts::InputUnit;
use dispatcher::MetricsSnapshot;
use serde::{Deserialize, Serialize};

/// `POST /process` body.
///
/// Missing fields decode as empty strings so the validator reports them.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub data: String,
}

impl From<ProcessRequest> for InputUnit {
    fn from(request: ProcessRequest) -> Self {
        InputUnit::new(request.tag, request.data)
    }
}

/// `{"message": ...}` used for both acknowledgments and errors
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new("OK")
    }
}

/// `GET /health` body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub in_flight: usize,
    pub dispatch: MetricsSnapshot,
}
