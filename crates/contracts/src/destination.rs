//! DestinationRef - closed set of output destinations
//!
//! Config names are resolved into this enum once, at load time.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Reference to one output destination.
///
/// `Unrecognized` and `Absent` exist so that a lenient configuration can
/// still carry them through to the writer, which rejects them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DestinationRef {
    /// Process standard output (`stdout`)
    StandardOut,
    /// Process standard error (`stderr`)
    StandardErr,
    /// Append-only file target (`file`)
    FileSink,
    /// Discard sink (`null`)
    NullSink,
    /// Any other configured name
    Unrecognized(String),
    /// Explicit null in the configuration
    Absent,
}

impl DestinationRef {
    /// Resolve a configured name
    pub fn from_name(name: &str) -> Self {
        match name {
            "stdout" => Self::StandardOut,
            "stderr" => Self::StandardErr,
            "file" => Self::FileSink,
            "null" => Self::NullSink,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Resolve an optional configured value (`None` = explicit null)
    pub fn from_config_value(value: Option<&str>) -> Self {
        value.map_or(Self::Absent, Self::from_name)
    }

    /// Name as it appears in configuration, `None` for `Absent`
    pub fn config_name(&self) -> Option<&str> {
        match self {
            Self::StandardOut => Some("stdout"),
            Self::StandardErr => Some("stderr"),
            Self::FileSink => Some("file"),
            Self::NullSink => Some("null"),
            Self::Unrecognized(name) => Some(name),
            Self::Absent => None,
        }
    }

    /// Whether the writer knows how to deliver to this destination
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unrecognized(_) | Self::Absent)
    }
}

impl fmt::Display for DestinationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name().unwrap_or("nil"))
    }
}

impl Serialize for DestinationRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.config_name() {
            Some(name) => serializer.serialize_some(name),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for DestinationRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_config_value(value.as_deref()))
    }
}
