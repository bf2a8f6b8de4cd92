//! SinkWriter - dispatch-by-kind switch over the concrete sinks

use contracts::{DestinationRef, DestinationWriter, SinkPaths, WriteError};
use tracing::instrument;

use crate::sinks::{AppendFileSink, NullSink, StreamSink};

/// Production `DestinationWriter`.
///
/// Holds one sink per destination kind. Has no retry logic of its own.
#[derive(Debug)]
pub struct SinkWriter {
    stdout: StreamSink,
    stderr: StreamSink,
    file: AppendFileSink,
    null: NullSink,
}

impl SinkWriter {
    pub fn new(file: AppendFileSink) -> Self {
        Self {
            stdout: StreamSink::stdout(),
            stderr: StreamSink::stderr(),
            file,
            null: NullSink::new(),
        }
    }

    /// Create from configured sink paths
    pub fn from_paths(paths: &SinkPaths) -> std::io::Result<Self> {
        let file = AppendFileSink::new("file", &paths.file_sink)?;
        Ok(Self::new(file))
    }

    pub fn file_sink(&self) -> &AppendFileSink {
        &self.file
    }

    pub fn null_sink(&self) -> &NullSink {
        &self.null
    }

    fn deliver(&self, destination: &DestinationRef, payload: &str) -> Result<(), WriteError> {
        match destination {
            DestinationRef::StandardOut => self.stdout.append(payload)?,
            DestinationRef::StandardErr => self.stderr.append(payload)?,
            DestinationRef::FileSink => self.file.append(payload)?,
            DestinationRef::NullSink => self.null.append(payload),
            DestinationRef::Absent => return Err(WriteError::NilDestination),
            DestinationRef::Unrecognized(name) => {
                return Err(WriteError::UnknownDestination(name.clone()))
            }
        }
        Ok(())
    }
}

impl DestinationWriter for SinkWriter {
    #[instrument(name = "sink_writer_write", skip_all, fields(destination = %destination))]
    async fn write(&self, destination: &DestinationRef, payload: &str) -> Result<(), WriteError> {
        self.deliver(destination, payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn writer_in(dir: &std::path::Path) -> SinkWriter {
        SinkWriter::new(AppendFileSink::new("file", dir.join("file.txt")).unwrap())
    }

    #[tokio::test]
    async fn test_null_sink_never_fails() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        for _ in 0..3 {
            writer.write(&DestinationRef::NullSink, "dropped").await.unwrap();
        }
        assert_eq!(writer.null_sink().discarded(), 3);
        assert!(!writer.file_sink().path().exists());
    }

    #[tokio::test]
    async fn test_absent_destination_fails_immediately() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        let err = writer.write(&DestinationRef::Absent, "x").await.unwrap_err();
        assert!(matches!(err, WriteError::NilDestination));
    }

    #[tokio::test]
    async fn test_unknown_destination_carries_name() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        let err = writer
            .write(&DestinationRef::Unrecognized("files".into()), "x")
            .await
            .unwrap_err();
        match err {
            WriteError::UnknownDestination(name) => assert_eq!(name, "files"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_file_destination_appends() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        writer.write(&DestinationRef::FileSink, "a").await.unwrap();
        writer.write(&DestinationRef::FileSink, "b").await.unwrap();

        let content = fs::read_to_string(dir.path().join("file.txt")).unwrap();
        assert_eq!(content, "a\nb\n");
    }

    #[tokio::test]
    async fn test_file_destination_io_error_is_verbatim() {
        let dir = tempdir().unwrap();
        let writer = SinkWriter::new(AppendFileSink::new("file", dir.path()).unwrap());

        let err = writer.write(&DestinationRef::FileSink, "x").await.unwrap_err();
        assert!(matches!(err, WriteError::Io(_)));
    }

    #[tokio::test]
    async fn test_standard_streams_succeed() {
        let dir = tempdir().unwrap();
        let writer = writer_in(dir.path());

        writer
            .write(&DestinationRef::StandardOut, "sink writer stdout test")
            .await
            .unwrap();
        writer
            .write(&DestinationRef::StandardErr, "sink writer stderr test")
            .await
            .unwrap();
    }
}
