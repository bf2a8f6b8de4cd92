//! # Dispatcher
//!
//! Tag-routed fan-out module.
//!
//! Responsible for:
//! - Validating inputs against the routing table
//! - Resolving a tag to its ordered destinations (first match wins)
//! - Delivering to every destination concurrently, with fixed-interval retry
//! - Dead-lettering payloads whose retries are exhausted
//! - Draining or abandoning in-flight work on shutdown

pub mod dead_letter;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod policy;
pub mod router;
pub mod sinks;
mod unit;
pub mod validate;
pub mod writer;

pub use contracts::{DestinationRef, DestinationWriter, DispatchOutcome, InputUnit, RoutingTable};
pub use dead_letter::DeadLetterStore;
pub use error::DispatcherError;
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use pipeline::{Pipeline, PipelineBuilder, ShutdownReport};
pub use policy::{RetryPolicy, ShutdownPolicy};
pub use router::resolve;
pub use sinks::{AppendFileSink, NullSink, StreamSink, StreamTarget};
pub use validate::validate;
pub use writer::SinkWriter;
