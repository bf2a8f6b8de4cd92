//! Dispatch metrics for observability

use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Counters shared by every dispatch unit of one pipeline
#[derive(Debug, Default)]
pub struct DispatchMetrics {
    /// Inputs currently being dispatched
    in_flight: AtomicUsize,
    /// Inputs handed to the pipeline
    dispatched: AtomicU64,
    /// Successful deliveries (per destination)
    delivered: AtomicU64,
    /// Failed write attempts (per attempt)
    failed_attempts: AtomicU64,
    /// Payloads sent to the dead-letter store (per destination)
    dead_lettered: AtomicU64,
    /// Dead-letter appends that themselves failed
    dead_letter_failures: AtomicU64,
}

impl DispatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }

    pub fn inc_in_flight(&self) {
        self.in_flight.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dec_in_flight(&self) {
        self.in_flight.fetch_sub(1, Ordering::Relaxed);
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    pub fn inc_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    pub fn inc_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failed_attempts(&self) -> u64 {
        self.failed_attempts.load(Ordering::Relaxed)
    }

    pub fn inc_failed_attempts(&self) {
        self.failed_attempts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dead_lettered(&self) -> u64 {
        self.dead_lettered.load(Ordering::Relaxed)
    }

    pub fn inc_dead_lettered(&self) {
        self.dead_lettered.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dead_letter_failures(&self) -> u64 {
        self.dead_letter_failures.load(Ordering::Relaxed)
    }

    pub fn inc_dead_letter_failures(&self) {
        self.dead_letter_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            in_flight: self.in_flight(),
            dispatched: self.dispatched(),
            delivered: self.delivered(),
            failed_attempts: self.failed_attempts(),
            dead_lettered: self.dead_lettered(),
            dead_letter_failures: self.dead_letter_failures(),
        }
    }
}

/// Snapshot of dispatch metrics (for reporting)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub in_flight: usize,
    pub dispatched: u64,
    pub delivered: u64,
    pub failed_attempts: u64,
    pub dead_lettered: u64,
    pub dead_letter_failures: u64,
}
