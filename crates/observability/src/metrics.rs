//! Dispatch metrics recording
//!
//! Thin wrappers over the `metrics` facade. Without an installed recorder
//! every call is a no-op.

use contracts::ValidationError;
use metrics::{counter, gauge, histogram};

/// Request passed validation and was handed to the pipeline
pub fn record_request_accepted(tag: &str) {
    counter!("fanout_requests_accepted_total", "tag" => tag.to_string()).increment(1);
}

/// Request rejected by the validator
pub fn record_request_rejected(err: &ValidationError) {
    counter!("fanout_requests_rejected_total", "reason" => err.kind()).increment(1);
}

/// Request body could not be decoded
pub fn record_request_malformed() {
    counter!("fanout_requests_rejected_total", "reason" => "malformed").increment(1);
}

/// Successful delivery and the attempt it succeeded on
pub fn record_delivered(destination: &str, attempt: u32) {
    counter!("fanout_delivered_total", "destination" => destination.to_string()).increment(1);
    histogram!("fanout_delivery_attempts", "destination" => destination.to_string())
        .record(f64::from(attempt));
}

/// One failed write attempt
pub fn record_write_failure(destination: &str) {
    counter!("fanout_write_failures_total", "destination" => destination.to_string())
        .increment(1);
}

/// Payload sent to the dead-letter store
pub fn record_dead_lettered(destination: &str) {
    counter!("fanout_dead_lettered_total", "destination" => destination.to_string())
        .increment(1);
}

/// Dead-letter append failed
pub fn record_dead_letter_failure() {
    counter!("fanout_dead_letter_failures_total").increment(1);
}

/// Inputs currently being dispatched
pub fn record_in_flight(in_flight: usize) {
    gauge!("fanout_dispatch_in_flight").set(in_flight as f64);
}
