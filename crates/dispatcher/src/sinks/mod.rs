//! Sink implementations
//!
//! Contains StreamSink (stdout/stderr), AppendFileSink, and NullSink.

mod file;
mod null;
mod stream;

pub(crate) use self::file::{append_line, ensure_parent_dir};
pub use self::file::AppendFileSink;
pub use self::null::NullSink;
pub use self::stream::{StreamSink, StreamTarget};
