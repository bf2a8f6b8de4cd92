//! `validate` command implementation.

use std::collections::HashSet;

use anyhow::{Context, Result};
use contracts::AppConfig;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;
use crate::error::load_config;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    http: String,
    route_count: usize,
    destination_count: usize,
    strict_destinations: bool,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    match load_config(&args.config) {
        Ok(config) => {
            let warnings = collect_warnings(&config);
            let destination_count = config
                .conf
                .entries()
                .iter()
                .map(|entry| entry.destinations.len())
                .sum();

            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", config.version),
                    http: config.http.clone(),
                    route_count: config.conf.len(),
                    destination_count,
                    strict_destinations: config.strict_destinations,
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(e.to_string()),
            warnings: None,
            summary: None,
        },
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.conf.is_empty() {
        warnings.push("No routes configured - every input will be rejected".to_string());
    }

    // Later entries with a repeated tag are never matched
    let mut seen = HashSet::new();
    for entry in config.conf.entries() {
        if !seen.insert(entry.tag.as_str()) {
            warnings.push(format!(
                "Tag '{}' appears more than once - only the first entry is used",
                entry.tag
            ));
        }
    }

    for entry in config.conf.entries() {
        if entry.destinations.is_empty() {
            warnings.push(format!(
                "Tag '{}' has no outputs - its inputs are accepted and dropped",
                entry.tag
            ));
        }
        for destination in entry.destinations.iter().filter(|d| !d.is_resolved()) {
            warnings.push(format!(
                "Tag '{}' routes to unknown output '{}' - its payloads will be dead-lettered",
                entry.tag, destination
            ));
        }
    }

    if config.retry.backoff_ms == 0 {
        warnings.push("retry.backoff_ms is 0 - failed writes are retried immediately".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  HTTP: {}", summary.http);
            println!("  Routes: {}", summary.route_count);
            println!("  Destinations: {}", summary.destination_count);
            println!("  Strict destinations: {}", summary.strict_destinations);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
