//! Configuration parsing
//!
//! TOML is the primary format; JSON and YAML are accepted as well.
//! YAML and JSON can express `null` destinations, TOML cannot.

use contracts::{AppConfig, ContractError};

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML (recommended)
    Toml,
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl ConfigFormat {
    /// Infer format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

pub fn parse_toml(content: &str) -> Result<AppConfig, ContractError> {
    toml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("TOML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse_json(content: &str) -> Result<AppConfig, ContractError> {
    serde_json::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("JSON parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

pub fn parse_yaml(content: &str) -> Result<AppConfig, ContractError> {
    serde_yaml::from_str(content).map_err(|e| ContractError::ConfigParse {
        message: format!("YAML parse error: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Parse configuration in the given format
pub fn parse(content: &str, format: ConfigFormat) -> Result<AppConfig, ContractError> {
    match format {
        ConfigFormat::Toml => parse_toml(content),
        ConfigFormat::Json => parse_json(content),
        ConfigFormat::Yaml => parse_yaml(content),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::DestinationRef;

    #[test]
    fn test_parse_toml_minimal() {
        let content = r#"
http = "127.0.0.1:9090"

[[conf]]
tag = "error"
outputs = ["stderr", "file"]

[[conf]]
tag = "info"
outputs = ["stdout"]
"#;
        let result = parse_toml(content);
        assert!(result.is_ok(), "Failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.http, "127.0.0.1:9090");
        assert_eq!(config.conf.len(), 2);
        assert_eq!(
            config.conf.find("error").unwrap().destinations,
            vec![DestinationRef::StandardErr, DestinationRef::FileSink]
        );
    }

    #[test]
    fn test_parse_yaml_with_null_output() {
        let content = r#"
http: ":8080"
conf:
  - tag: "debug"
    outputs:
      - "stdout"
      - null
"#;
        let config = parse_yaml(content).unwrap();
        assert_eq!(
            config.conf.find("debug").unwrap().destinations,
            vec![DestinationRef::StandardOut, DestinationRef::Absent]
        );
    }

    #[test]
    fn test_parse_json_minimal() {
        let content = r#"{
            "retry": { "max_attempts": 5, "backoff_ms": 10 },
            "shutdown": { "policy": "abandon" },
            "routes": [{ "tag": "trace", "outputs": ["null"] }]
        }"#;
        let config = parse_json(content).unwrap();
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.shutdown.policy, contracts::ShutdownMode::Abandon);
        assert!(config.conf.contains("trace"));
    }

    #[test]
    fn test_parse_toml_syntax_error() {
        let result = parse_toml("invalid toml [[[");
        assert!(matches!(result, Err(ContractError::ConfigParse { .. })));
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_extension("json"), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_extension("yml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("yaml"), Some(ConfigFormat::Yaml));
        assert_eq!(ConfigFormat::from_extension("ini"), None);
    }
}
