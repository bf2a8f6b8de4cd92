//! Dispatcher error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures building a pipeline. Delivery itself never returns an error.
#[derive(Debug, Error)]
pub enum DispatcherError {
    /// A sink target could not be prepared
    #[error("failed to create sink '{name}' at {}: {source}", path.display())]
    SinkCreation {
        name: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The dead-letter store could not be prepared
    #[error("failed to open dead-letter store at {}: {source}", path.display())]
    DeadLetter {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DispatcherError {
    pub fn sink_creation(name: impl Into<String>, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SinkCreation {
            name: name.into(),
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_creation_message() {
        let err = DispatcherError::sink_creation(
            "file",
            "/tmp/out.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "failed to create sink 'file' at /tmp/out.txt: denied"
        );
    }
}
