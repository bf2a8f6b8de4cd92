//! Configuration validation
//!
//! Rules:
//! - field constraints declared on the contract structs (listen address, attempts)
//! - route tags are non-empty
//! - sink paths are non-empty and distinct
//! - in strict mode every destination resolves to a known sink

use contracts::{AppConfig, ContractError};
use validator::Validate;

/// Validate an AppConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &AppConfig) -> Result<(), ContractError> {
    validate_fields(config)?;
    validate_route_tags(config)?;
    validate_paths(config)?;
    if config.strict_destinations {
        validate_destinations(config)?;
    }
    Ok(())
}

/// Constraints declared with `#[validate]` on the contract structs
fn validate_fields(config: &AppConfig) -> Result<(), ContractError> {
    config.validate().map_err(|errors| {
        let field = errors
            .field_errors()
            .keys()
            .next()
            .map(|k| k.to_string())
            .unwrap_or_else(|| "retry".to_string());
        ContractError::config_validation(field, errors.to_string())
    })
}

fn validate_route_tags(config: &AppConfig) -> Result<(), ContractError> {
    for (idx, entry) in config.conf.entries().iter().enumerate() {
        if entry.tag.is_empty() {
            return Err(ContractError::config_validation(
                format!("conf[{idx}].tag"),
                "tag cannot be empty",
            ));
        }
    }
    Ok(())
}

fn validate_paths(config: &AppConfig) -> Result<(), ContractError> {
    let paths = &config.paths;
    if paths.file_sink.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "paths.file_sink",
            "path cannot be empty",
        ));
    }
    if paths.dead_letter.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "paths.dead_letter",
            "path cannot be empty",
        ));
    }
    if paths.file_sink == paths.dead_letter {
        return Err(ContractError::config_validation(
            "paths.dead_letter",
            format!(
                "dead-letter store must differ from file sink ({})",
                paths.file_sink.display()
            ),
        ));
    }
    Ok(())
}

fn validate_destinations(config: &AppConfig) -> Result<(), ContractError> {
    for entry in config.conf.entries() {
        for (idx, destination) in entry.destinations.iter().enumerate() {
            if !destination.is_resolved() {
                return Err(ContractError::config_validation(
                    format!("conf[tag={}].outputs[{idx}]", entry.tag),
                    format!("unknown output '{destination}' (expected stdout, stderr, file or null)"),
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{DestinationRef, RouteEntry, RoutingTable};
    use std::path::PathBuf;

    fn minimal_config() -> AppConfig {
        AppConfig::with_routes(RoutingTable::new(vec![
            RouteEntry::new(
                "error",
                vec![DestinationRef::StandardErr, DestinationRef::FileSink],
            ),
            RouteEntry::new("info", vec![DestinationRef::StandardOut]),
        ]))
    }

    #[test]
    fn test_valid_config() {
        assert!(validate(&minimal_config()).is_ok());
    }

    #[test]
    fn test_empty_listen_address() {
        let mut config = minimal_config();
        config.http = String::new();
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("http"), "got: {err}");
    }

    #[test]
    fn test_empty_tag() {
        let mut config = minimal_config();
        config.conf = RoutingTable::new(vec![RouteEntry::new("", vec![])]);
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("tag cannot be empty"), "got: {err}");
    }

    #[test]
    fn test_shared_file_and_dead_letter_path() {
        let mut config = minimal_config();
        config.paths.dead_letter = PathBuf::from("./file.txt");
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("must differ"), "got: {err}");
    }

    #[test]
    fn test_unknown_destination_rejected_when_strict() {
        let mut config = minimal_config();
        config.conf = RoutingTable::new(vec![RouteEntry::new(
            "warn",
            vec![DestinationRef::Unrecognized("files".into())],
        )]);
        let err = validate(&config).unwrap_err().to_string();
        assert!(err.contains("unknown output 'files'"), "got: {err}");
    }

    #[test]
    fn test_absent_destination_allowed_when_lenient() {
        let mut config = minimal_config();
        config.strict_destinations = false;
        config.conf = RoutingTable::new(vec![RouteEntry::new(
            "warn",
            vec![DestinationRef::Absent],
        )]);
        assert!(validate(&config).is_ok());
    }
}
