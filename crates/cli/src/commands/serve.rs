//! `serve` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use contracts::AppConfig;
use dispatcher::Pipeline;
use http_api::{build_router, AppState};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cli::ServeArgs;
use crate::error::{load_config, CliError};

/// Execute the `serve` command
pub async fn run_serve(args: &ServeArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    let mut config = load_config(&args.config)?;

    // Apply CLI overrides
    if let Some(ref http) = args.http {
        info!(http = %http, "Overriding listen address from CLI");
        config.http = http.clone();
    }

    info!(
        http = %config.http,
        routes = config.conf.len(),
        file_sink = %config.paths.file_sink.display(),
        dead_letter = %config.paths.dead_letter.display(),
        max_attempts = config.retry.max_attempts,
        backoff_ms = config.retry.backoff_ms,
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&config);
        return Ok(());
    }

    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)
            .context("Failed to start metrics endpoint")?;
    }

    let pipeline = Pipeline::from_config(&config).map_err(CliError::from)?;
    let app = build_router(AppState::new(Arc::new(config.conf.clone()), pipeline.clone()));
    let listener = http_api::bind(&config.http).await.map_err(CliError::from)?;

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(watch_signals(cancel.clone()));

    info!("Starting HTTP ingress...");
    let served = http_api::serve(listener, app, cancel.clone()).await;

    cancel.cancel();
    watcher.abort();

    // No new dispatches can arrive once the server has stopped
    info!(policy = ?pipeline.shutdown_policy(), "Shutting down dispatch pipeline");
    let report = pipeline.shutdown().await;
    let metrics = pipeline.metrics();
    info!(
        in_flight_at_shutdown = report.in_flight,
        cancelled = report.cancelled,
        dispatched = metrics.dispatched,
        delivered = metrics.delivered,
        failed_attempts = metrics.failed_attempts,
        dead_lettered = metrics.dead_lettered,
        dead_letter_failures = metrics.dead_letter_failures,
        "Dispatch pipeline stopped"
    );

    served.map_err(CliError::from)?;

    info!("Fanout finished");
    Ok(())
}

/// Cancel `cancel` on Ctrl+C or SIGTERM
async fn watch_signals(cancel: CancellationToken) {
    tokio::select! {
        result = shutdown_signal() => {
            match result {
                Ok(()) => warn!("Received shutdown signal, stopping server..."),
                Err(e) => error!(error = %e, "Signal handling unavailable, stopping server"),
            }
            cancel.cancel();
        }
        _ = cancel.cancelled() => {}
    }
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() -> Result<(), CliError> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate()).map_err(CliError::Signal)?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map_err(CliError::Signal)?,
            _ = terminate.recv() => {}
        }
    }

    #[cfg(not(unix))]
    tokio::signal::ctrl_c().await.map_err(CliError::Signal)?;

    Ok(())
}

/// Print configuration summary for dry-run mode
fn print_config_summary(config: &AppConfig) {
    println!("\n=== Configuration Summary ===\n");
    println!("HTTP: {}", config.http);
    println!("Strict destinations: {}", config.strict_destinations);
    println!("\nPaths:");
    println!("  File sink: {}", config.paths.file_sink.display());
    println!("  Dead letter: {}", config.paths.dead_letter.display());
    println!("\nRetry:");
    println!("  Max attempts: {}", config.retry.max_attempts);
    println!("  Backoff: {}ms", config.retry.backoff_ms);
    println!("\nShutdown:");
    println!("  Policy: {:?}", config.shutdown.policy);
    println!("  Drain timeout: {}s", config.shutdown.drain_timeout_secs);

    println!("\nRoutes ({}):", config.conf.len());
    for entry in config.conf.entries() {
        let names: Vec<String> = entry.destinations.iter().map(ToString::to_string).collect();
        println!("  - {} -> [{}]", entry.tag, names.join(", "));
    }

    println!();
}
