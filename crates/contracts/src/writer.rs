//! DestinationWriter trait - dispatcher output interface
//!
//! Defines the abstract interface for delivering one payload to one destination.

use crate::{DestinationRef, WriteError};

/// Payload delivery trait
///
/// Implementations must not retry; retry policy belongs to the pipeline.
/// A writer is shared by every dispatch unit, so `write` takes `&self`.
#[trait_variant::make(DestinationWriter: Send)]
pub trait LocalDestinationWriter {
    /// Deliver `payload` (one line) to `destination`
    ///
    /// # Errors
    /// `NilDestination` / `UnknownDestination` without attempting a write,
    /// or the underlying I/O error
    async fn write(&self, destination: &DestinationRef, payload: &str) -> Result<(), WriteError>;
}
