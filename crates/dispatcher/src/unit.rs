//! Dispatch unit - delivers one payload to one destination
//!
//! `Attempting(n) -> Delivered | Attempting(n + 1) -> ... -> Delivered | DeadLettered`

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, warn};

use contracts::{DestinationRef, DestinationWriter, DispatchOutcome, InputUnit};

use crate::dead_letter::DeadLetterStore;
use crate::metrics::DispatchMetrics;
use crate::policy::RetryPolicy;

/// Everything a unit needs, cloned into each spawned task
pub(crate) struct UnitContext<W> {
    pub writer: Arc<W>,
    pub dead_letter: Arc<DeadLetterStore>,
    pub retry: RetryPolicy,
    pub metrics: Arc<DispatchMetrics>,
    pub cancel: CancellationToken,
}

impl<W> Clone for UnitContext<W> {
    fn clone(&self) -> Self {
        Self {
            writer: Arc::clone(&self.writer),
            dead_letter: Arc::clone(&self.dead_letter),
            retry: self.retry,
            metrics: Arc::clone(&self.metrics),
            cancel: self.cancel.clone(),
        }
    }
}

/// Run the retry loop for one destination.
///
/// Every failed attempt is followed by the fixed backoff. Cancellation only
/// cuts a backoff short; the attempt in progress always completes.
#[instrument(
    name = "dispatch_unit",
    skip_all,
    fields(tag = %input.tag, destination = %destination)
)]
pub(crate) async fn deliver<W: DestinationWriter + Sync>(
    ctx: &UnitContext<W>,
    destination: &DestinationRef,
    input: &InputUnit,
) -> DispatchOutcome {
    let label = destination.to_string();

    for attempt in 1..=ctx.retry.max_attempts {
        match ctx.writer.write(destination, &input.payload).await {
            Ok(()) => {
                ctx.metrics.inc_delivered();
                observability::record_delivered(&label, attempt);
                debug!(attempt, "Delivered");
                return DispatchOutcome::Delivered;
            }
            Err(e) => {
                ctx.metrics.inc_failed_attempts();
                observability::record_write_failure(&label);
                warn!(
                    attempt,
                    max_attempts = ctx.retry.max_attempts,
                    error = %e,
                    "Error writing into {destination}"
                );
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(ctx.retry.backoff) => {}
            _ = ctx.cancel.cancelled() => {
                warn!(attempt, "Shutdown requested, abandoning remaining attempts");
                break;
            }
        }
    }

    error!("Failed to write to {destination} after retries");
    dead_letter(ctx, &label, &input.payload);
    DispatchOutcome::DeadLettered
}

/// Best-effort append; a failure here ends the unit without further logging.
pub(crate) fn dead_letter<W>(ctx: &UnitContext<W>, label: &str, payload: &str) {
    ctx.metrics.inc_dead_lettered();
    observability::record_dead_lettered(label);

    if ctx.dead_letter.append(payload).is_err() {
        ctx.metrics.inc_dead_letter_failures();
        observability::record_dead_letter_failure();
    }
}
