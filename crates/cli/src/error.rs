//! Error types for CLI operations.

use std::path::{Path, PathBuf};

use contracts::{AppConfig, ContractError};
use dispatcher::DispatcherError;
use http_api::ServerError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration file not found
    #[error("Configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration parsing or validation error
    #[error("Failed to load configuration from {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ContractError,
    },

    /// Sink or dead-letter store could not be opened
    #[error("Failed to build dispatch pipeline: {0}")]
    Pipeline(#[from] DispatcherError),

    /// HTTP server error
    #[error(transparent)]
    Server(#[from] ServerError),

    /// Signal handler installation failed
    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] std::io::Error),
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Load and validate the configuration at `path`
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(CliError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }

    config_loader::ConfigLoader::load_from_path(path).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_reported() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_invalid_config_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[[conf]]\ntag = \"\"\noutputs = []\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }
}
