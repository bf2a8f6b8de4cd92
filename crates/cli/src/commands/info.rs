//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::AppConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::load_config;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    http: String,
    strict_destinations: bool,
    paths: PathsInfo,
    retry: RetryInfo,
    shutdown: ShutdownInfo,
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    routes: Vec<RouteInfo>,
}

#[derive(Serialize)]
struct PathsInfo {
    file_sink: String,
    dead_letter: String,
}

#[derive(Serialize)]
struct RetryInfo {
    max_attempts: u32,
    backoff_ms: u64,
}

#[derive(Serialize)]
struct ShutdownInfo {
    policy: String,
    drain_timeout_secs: u64,
}

#[derive(Serialize)]
struct RouteInfo {
    tag: String,
    outputs: Vec<String>,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    let config = load_config(&args.config)?;

    if args.json {
        let info = build_config_info(&config, args);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&config, args);
    }

    Ok(())
}

fn build_config_info(config: &AppConfig, args: &InfoArgs) -> ConfigInfo {
    let routes = if args.routes {
        config
            .conf
            .entries()
            .iter()
            .map(|entry| RouteInfo {
                tag: entry.tag.clone(),
                outputs: entry.destinations.iter().map(ToString::to_string).collect(),
            })
            .collect()
    } else {
        Vec::new()
    };

    ConfigInfo {
        version: format!("{:?}", config.version),
        http: config.http.clone(),
        strict_destinations: config.strict_destinations,
        paths: PathsInfo {
            file_sink: config.paths.file_sink.display().to_string(),
            dead_letter: config.paths.dead_letter.display().to_string(),
        },
        retry: RetryInfo {
            max_attempts: config.retry.max_attempts,
            backoff_ms: config.retry.backoff_ms,
        },
        shutdown: ShutdownInfo {
            policy: format!("{:?}", config.shutdown.policy),
            drain_timeout_secs: config.shutdown.drain_timeout_secs,
        },
        tags: config.conf.tags().into_iter().map(str::to_string).collect(),
        routes,
    }
}

fn print_config_info(config: &AppConfig, args: &InfoArgs) {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                   Fanout Configuration                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("🌐 Ingress");
    println!("   ├─ Version: {:?}", config.version);
    println!("   ├─ HTTP: {}", config.http);
    println!("   └─ Strict destinations: {}", config.strict_destinations);

    println!("\n📁 Paths");
    println!("   ├─ File sink: {}", config.paths.file_sink.display());
    println!("   └─ Dead letter: {}", config.paths.dead_letter.display());

    println!("\n⚙️  Delivery");
    println!("   ├─ Max attempts: {}", config.retry.max_attempts);
    println!("   ├─ Backoff: {}ms", config.retry.backoff_ms);
    println!("   ├─ Shutdown policy: {:?}", config.shutdown.policy);
    println!("   └─ Drain timeout: {}s", config.shutdown.drain_timeout_secs);

    let entries = config.conf.entries();
    println!("\n📤 Routes ({})", entries.len());
    for (i, entry) in entries.iter().enumerate() {
        let is_last = i == entries.len() - 1;
        let prefix = if is_last { "└─" } else { "├─" };

        if args.routes {
            let names: Vec<String> = entry.destinations.iter().map(ToString::to_string).collect();
            println!("   {} {} -> [{}]", prefix, entry.tag, names.join(", "));
        } else {
            println!(
                "   {} {} ({} outputs)",
                prefix,
                entry.tag,
                entry.destinations.len()
            );
        }
    }

    println!();
}
