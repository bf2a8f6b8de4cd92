//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Fanout - tag-routed payload fan-out service
#[derive(Parser, Debug)]
#[command(
    name = "fanout",
    author,
    version,
    about = "Tag-routed payload fan-out service",
    long_about = "Accepts tagged payloads over HTTP, acknowledges them immediately, and \n\
                  delivers each payload to every destination configured for its tag \n\
                  with retry. Payloads that exhaust their retries are dead-lettered."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "FANOUT_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "FANOUT_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP ingress and dispatch pipeline
    Serve(ServeArgs),

    /// Validate configuration file without serving
    Validate(ValidateArgs),

    /// Display configuration information
    Info(InfoArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Path to configuration file (TOML, JSON or YAML)
    #[arg(short, long, default_value = "config.toml", env = "FANOUT_CONFIG")]
    pub config: PathBuf,

    /// Override the HTTP listen address from configuration
    #[arg(long, env = "FANOUT_HTTP")]
    pub http: Option<String>,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "9000", env = "FANOUT_METRICS_PORT")]
    pub metrics_port: u16,

    /// Validate configuration and exit without serving
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file to validate
    #[arg(short, long, default_value = "config.toml", env = "FANOUT_CONFIG")]
    pub config: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `info` command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml", env = "FANOUT_CONFIG")]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show the routing table
    #[arg(long)]
    pub routes: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}

impl From<LogFormat> for observability::LogFormat {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Json => observability::LogFormat::Json,
            LogFormat::Pretty => observability::LogFormat::Pretty,
            LogFormat::Compact => observability::LogFormat::Compact,
        }
    }
}
