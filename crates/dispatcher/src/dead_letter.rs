//! DeadLetterStore - append-only fallback for undeliverable payloads

use std::io;
use std::path::{Path, PathBuf};

use crate::sinks::{append_line, ensure_parent_dir};

/// One line per dead-lettered payload. Only the payload is recorded.
#[derive(Debug, Clone)]
pub struct DeadLetterStore {
    path: PathBuf,
}

impl DeadLetterStore {
    pub fn new(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, payload: &str) -> io::Result<()> {
        append_line(&self.path, payload)
    }
}
