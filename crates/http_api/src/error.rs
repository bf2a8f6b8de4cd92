//! API error types
//!
//! Every error renders as `{"message": <reason>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::{RoutingTable, ValidationError};
use thiserror::Error;

use crate::types::MessageResponse;

/// API errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body was not valid JSON for a process request
    #[error("invalid input")]
    InvalidInput,

    #[error("tag parameter is required")]
    EmptyTag,

    #[error("tag parameter should be one of: {expected}")]
    UnknownTag { tag: String, expected: String },

    #[error("data parameter is required")]
    EmptyPayload,
}

impl ApiError {
    /// Map a validator rejection, listing the configured tags for unknown ones
    pub fn from_validation(err: ValidationError, routes: &RoutingTable) -> Self {
        match err {
            ValidationError::EmptyTag => Self::EmptyTag,
            ValidationError::UnknownTag { tag } => Self::UnknownTag {
                tag,
                expected: routes
                    .tags()
                    .iter()
                    .map(|t| format!("'{t}'"))
                    .collect::<Vec<_>>()
                    .join(", "),
            },
            ValidationError::EmptyPayload => Self::EmptyPayload,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::EmptyTag => StatusCode::BAD_REQUEST,
            Self::UnknownTag { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::EmptyPayload => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = MessageResponse::new(self.to_string());

        tracing::warn!(
            error_message = %body.message,
            status = %status,
            "Request rejected"
        );

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
