//! StreamSink - writes payload lines to the process's standard streams

use std::io::{self, Write};

/// Which standard stream a StreamSink writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamTarget {
    Stdout,
    Stderr,
}

/// Sink for stdout / stderr
#[derive(Debug, Clone, Copy)]
pub struct StreamSink {
    target: StreamTarget,
}

impl StreamSink {
    pub fn stdout() -> Self {
        Self {
            target: StreamTarget::Stdout,
        }
    }

    pub fn stderr() -> Self {
        Self {
            target: StreamTarget::Stderr,
        }
    }

    pub fn target(&self) -> StreamTarget {
        self.target
    }

    /// Append `payload` + newline, holding the stream lock for the whole line
    pub fn append(&self, payload: &str) -> io::Result<()> {
        match self.target {
            StreamTarget::Stdout => write_line(&mut io::stdout().lock(), payload),
            StreamTarget::Stderr => write_line(&mut io::stderr().lock(), payload),
        }
    }
}

fn write_line<W: Write>(out: &mut W, payload: &str) -> io::Result<()> {
    let mut record = String::with_capacity(payload.len() + 1);
    record.push_str(payload);
    record.push('\n');

    out.write_all(record.as_bytes())?;
    out.flush()
}
