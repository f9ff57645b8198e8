//! Configuration loading from tally.toml.

use adaptors::AdaptorConfig;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Event name prefix handed to every adaptor. Required.
    pub prefix: String,

    /// Enable hook-failure diagnostic logging.
    #[serde(default)]
    pub debug: bool,

    /// Backend sections, consumed by each adaptor's own constructor.
    #[serde(default)]
    pub adaptors: AdaptorConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml = r#"
prefix = "Main"
debug = true

[adaptors.ga]
id = "UA-0000-1"
site = "example.com"

[adaptors.mixpanel]
token = "tok"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.prefix, "Main");
        assert!(config.debug);
        assert!(config.adaptors.ga.is_some());
        assert!(config.adaptors.mixpanel.is_some());
        assert!(config.adaptors.gosquared.is_none());
    }

    #[test]
    fn prefix_is_required() {
        let err = Config::parse("debug = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn debug_defaults_off() {
        let config = Config::parse(r#"prefix = "Main""#).unwrap();
        assert!(!config.debug);
        assert!(adaptors::from_config(&config.adaptors).is_empty());
    }
}
