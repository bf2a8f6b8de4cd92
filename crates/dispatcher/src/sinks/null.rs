//! NullSink - discards all payloads

use std::sync::atomic::{AtomicU64, Ordering};

/// Sink that drops every payload and only counts them
#[derive(Debug, Default)]
pub struct NullSink {
    discarded: AtomicU64,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, _payload: &str) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of payloads discarded so far
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }
}
