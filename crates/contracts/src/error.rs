//! Layered error definitions
//!
//! Categorized by phase: config / validation / write

use thiserror::Error;

/// Unified error type for configuration and general failures
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Rejection of an input before it reaches the router.
///
/// Variants are listed in the order the validator checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("tag parameter is required")]
    EmptyTag,

    #[error("tag '{tag}' has no configured route")]
    UnknownTag { tag: String },

    #[error("data parameter is required")]
    EmptyPayload,
}

impl ValidationError {
    /// Stable machine-readable kind (used as a metrics label)
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyTag => "empty_tag",
            Self::UnknownTag { .. } => "unknown_tag",
            Self::EmptyPayload => "empty_payload",
        }
    }
}

/// Failure delivering one payload to one destination
#[derive(Debug, Error)]
pub enum WriteError {
    /// Destination reference was explicitly null
    #[error("output is nil")]
    NilDestination,

    /// Destination name did not match any known sink
    #[error("invalid output channel: {0}")]
    UnknownDestination(String),

    /// Underlying stream or file error, surfaced verbatim
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
