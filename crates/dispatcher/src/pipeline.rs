//! Pipeline - concurrent fan-out of one input to its destinations
//!
//! `dispatch` is fire-and-continue: it spawns a tracked background task and
//! returns. That task spawns one unit per destination and joins them. Delivery
//! is best-effort: every destination is attempted, and outcomes are only
//! observable through logs, metrics and the dead-letter store.

use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, instrument, warn};

use contracts::{AppConfig, DestinationRef, DestinationWriter, DispatchOutcome, InputUnit};

use crate::dead_letter::DeadLetterStore;
use crate::error::DispatcherError;
use crate::metrics::{DispatchMetrics, MetricsSnapshot};
use crate::policy::{RetryPolicy, ShutdownPolicy};
use crate::unit::{self, UnitContext};
use crate::writer::SinkWriter;

/// Builder for creating a Pipeline
pub struct PipelineBuilder<W> {
    writer: W,
    dead_letter: DeadLetterStore,
    retry: RetryPolicy,
    shutdown: ShutdownPolicy,
}

impl<W: DestinationWriter + Sync + 'static> PipelineBuilder<W> {
    pub fn new(writer: W, dead_letter: DeadLetterStore) -> Self {
        Self {
            writer,
            dead_letter,
            retry: RetryPolicy::default(),
            shutdown: ShutdownPolicy::default(),
        }
    }

    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn shutdown(mut self, shutdown: ShutdownPolicy) -> Self {
        self.shutdown = shutdown;
        self
    }

    pub fn build(self) -> Pipeline<W> {
        Pipeline {
            ctx: UnitContext {
                writer: Arc::new(self.writer),
                dead_letter: Arc::new(self.dead_letter),
                retry: self.retry,
                metrics: Arc::new(DispatchMetrics::new()),
                cancel: CancellationToken::new(),
            },
            shutdown: self.shutdown,
            tracker: TaskTracker::new(),
        }
    }
}

/// Result of `Pipeline::shutdown`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    /// Dispatches still running when shutdown began
    pub in_flight: usize,
    /// Whether units were told to abandon their remaining attempts
    pub cancelled: bool,
}

/// The dispatch pipeline.
///
/// Cloning is cheap and every clone shares the same writer, metrics and
/// task tracker.
pub struct Pipeline<W> {
    ctx: UnitContext<W>,
    shutdown: ShutdownPolicy,
    tracker: TaskTracker,
}

impl<W> Clone for Pipeline<W> {
    fn clone(&self) -> Self {
        Self {
            ctx: self.ctx.clone(),
            shutdown: self.shutdown,
            tracker: self.tracker.clone(),
        }
    }
}

impl Pipeline<SinkWriter> {
    /// Create a pipeline with the production sinks from configuration
    #[instrument(name = "pipeline_from_config", skip(config))]
    pub fn from_config(config: &AppConfig) -> Result<Self, DispatcherError> {
        let writer = SinkWriter::from_paths(&config.paths).map_err(|source| {
            DispatcherError::sink_creation("file", &config.paths.file_sink, source)
        })?;
        let dead_letter =
            DeadLetterStore::new(&config.paths.dead_letter).map_err(|source| {
                DispatcherError::DeadLetter {
                    path: config.paths.dead_letter.clone(),
                    source,
                }
            })?;

        Ok(PipelineBuilder::new(writer, dead_letter)
            .retry(RetryPolicy::from(&config.retry))
            .shutdown(ShutdownPolicy::from(&config.shutdown))
            .build())
    }
}

impl<W: DestinationWriter + Sync + 'static> Pipeline<W> {
    pub fn writer(&self) -> &W {
        &self.ctx.writer
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.ctx.retry
    }

    pub fn shutdown_policy(&self) -> ShutdownPolicy {
        self.shutdown
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.ctx.metrics.snapshot()
    }

    /// Number of dispatches that have not finished yet
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.tracker.is_closed()
    }

    /// Dispatch `input` to `destinations` in the background.
    ///
    /// Returns before any write is attempted. After `shutdown` has begun the
    /// payload is dead-lettered once per destination instead, still off the
    /// caller's task.
    pub fn dispatch(&self, input: InputUnit, destinations: Vec<DestinationRef>) {
        if destinations.is_empty() {
            debug!(tag = %input.tag, "No destinations configured, nothing to dispatch");
            return;
        }

        // Taken before the closed check so a concurrent `shutdown` waits for this dispatch
        let token = self.tracker.token();

        if self.tracker.is_closed() {
            warn!(
                tag = %input.tag,
                destinations = destinations.len(),
                "Pipeline shutting down, dead-lettering payload"
            );
            let ctx = self.ctx.clone();
            tokio::spawn(async move {
                let _token = token;
                for destination in &destinations {
                    unit::dead_letter(&ctx, &destination.to_string(), &input.payload);
                }
            });
            return;
        }

        let pipeline = self.clone();
        tokio::spawn(async move {
            let _token = token;
            pipeline.dispatch_and_wait(input, destinations).await;
        });
    }

    /// Fan out to every destination and wait for all units to finish.
    ///
    /// Outcomes are returned in destination order. A unit that panics is
    /// logged and left out of the result.
    #[instrument(
        name = "pipeline_dispatch",
        skip_all,
        fields(tag = %input.tag, destinations = destinations.len())
    )]
    pub async fn dispatch_and_wait(
        &self,
        input: InputUnit,
        destinations: Vec<DestinationRef>,
    ) -> Vec<(DestinationRef, DispatchOutcome)> {
        self.ctx.metrics.inc_dispatched();
        self.ctx.metrics.inc_in_flight();
        observability::record_in_flight(self.ctx.metrics.in_flight());

        let input = Arc::new(input);
        let mut units = JoinSet::new();
        for (idx, destination) in destinations.iter().cloned().enumerate() {
            let ctx = self.ctx.clone();
            let input = Arc::clone(&input);
            units.spawn(async move {
                let outcome = unit::deliver(&ctx, &destination, &input).await;
                (idx, outcome)
            });
        }

        let mut outcomes: Vec<Option<DispatchOutcome>> = vec![None; destinations.len()];
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok((idx, outcome)) => outcomes[idx] = Some(outcome),
                Err(e) => error!(error = ?e, "Dispatch unit panicked"),
            }
        }

        self.ctx.metrics.dec_in_flight();
        observability::record_in_flight(self.ctx.metrics.in_flight());

        let results: Vec<_> = destinations
            .into_iter()
            .zip(outcomes)
            .filter_map(|(destination, outcome)| outcome.map(|o| (destination, o)))
            .collect();

        debug!(
            delivered = results.iter().filter(|(_, o)| o.is_delivered()).count(),
            total = results.len(),
            "Dispatch complete"
        );
        results
    }

    /// Stop accepting dispatches and settle in-flight ones per the shutdown policy.
    ///
    /// Safe to call more than once. A later call also waits for payloads that
    /// were dead-lettered because they arrived after the first one.
    #[instrument(name = "pipeline_shutdown", skip(self))]
    pub async fn shutdown(&self) -> ShutdownReport {
        let in_flight = self.tracker.len();
        self.tracker.close();
        info!(in_flight, policy = ?self.shutdown, "Pipeline shutting down");

        let cancelled = match self.shutdown {
            ShutdownPolicy::Abandon => {
                self.ctx.cancel.cancel();
                self.tracker.wait().await;
                true
            }
            ShutdownPolicy::Drain { timeout } => {
                match tokio::time::timeout(timeout, self.tracker.wait()).await {
                    Ok(()) => false,
                    Err(_) => {
                        warn!(
                            remaining = self.tracker.len(),
                            timeout_secs = timeout.as_secs_f64(),
                            "Drain timed out, abandoning remaining retries"
                        );
                        self.ctx.cancel.cancel();
                        self.tracker.wait().await;
                        true
                    }
                }
            }
        };

        let snapshot = self.metrics();
        info!(
            delivered = snapshot.delivered,
            dead_lettered = snapshot.dead_lettered,
            cancelled,
            "Pipeline shutdown complete"
        );

        ShutdownReport {
            in_flight,
            cancelled,
        }
    }
}
