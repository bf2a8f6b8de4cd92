//! AppendFileSink - appends payload lines to a fixed file

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Sink that appends one line per payload to a file.
///
/// The file is opened for every record and closed before `append` returns,
/// so no handle is held between writes.
#[derive(Debug, Clone)]
pub struct AppendFileSink {
    name: String,
    path: PathBuf,
}

impl AppendFileSink {
    /// Create a new AppendFileSink
    ///
    /// Creates the parent directory if it doesn't exist. The file itself is
    /// created lazily on first append.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        ensure_parent_dir(&path)?;
        Ok(Self {
            name: name.into(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(name = "file_sink_append", skip(self, payload), fields(sink = %self.name))]
    pub fn append(&self, payload: &str) -> io::Result<()> {
        append_line(&self.path, payload)?;
        debug!(path = %self.path.display(), bytes = payload.len() + 1, "Line appended");
        Ok(())
    }
}

/// Append `line` plus a newline to `path` in a single write.
///
/// `O_APPEND` with one `write_all` per record keeps concurrent line records
/// from interleaving.
pub(crate) fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut record = String::with_capacity(line.len() + 1);
    record.push_str(line);
    record.push('\n');

    file.write_all(record.as_bytes())
}

pub(crate) fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_file_sink_appends_lines() {
        let dir = tempdir().unwrap();
        let sink = AppendFileSink::new("file", dir.path().join("file.txt")).unwrap();

        sink.append("first").unwrap();
        sink.append("second").unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_file_sink_creates_parent_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("out.txt");
        let sink = AppendFileSink::new("file", &path).unwrap();

        sink.append("hello").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_sink_surfaces_open_error() {
        let dir = tempdir().unwrap();
        // Path is a directory: open() fails every time
        let sink = AppendFileSink::new("file", dir.path()).unwrap();

        assert!(sink.append("x").is_err());
    }

    #[test]
    fn test_concurrent_appends_keep_lines_intact() {
        let dir = tempdir().unwrap();
        let path = Arc::new(dir.path().join("shared.txt"));

        let threads: Vec<_> = (0..8)
            .map(|t| {
                let path = Arc::clone(&path);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        append_line(&path, &format!("thread-{t}-line-{i}")).unwrap();
                    }
                })
            })
            .collect();
        for handle in threads {
            handle.join().unwrap();
        }

        let content = fs::read_to_string(path.as_ref()).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.starts_with("thread-") && l.contains("-line-")));
    }
}
