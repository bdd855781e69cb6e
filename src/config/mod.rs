//! Configuration loading for the converter

use crate::core::naming::NamingStrategy;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Converter settings
///
/// ```yaml
/// naming: camel_case
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Convention used for fields without an explicit relation name
    #[serde(default)]
    pub naming: NamingStrategy,
}

impl ConverterConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ConverterConfig::default();
        assert_eq!(config.naming, NamingStrategy::Identity);
    }

    #[test]
    fn test_yaml_parsing() {
        let config = ConverterConfig::from_yaml_str("naming: kebab_case\n").unwrap();
        assert_eq!(config.naming, NamingStrategy::KebabCase);
    }

    #[test]
    fn test_missing_naming_defaults() {
        let config = ConverterConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, ConverterConfig::default());
    }

    #[test]
    fn test_json_parsing() {
        let config = ConverterConfig::from_json_str(r#"{ "naming": "camel_case" }"#).unwrap();
        assert_eq!(config.naming, NamingStrategy::CamelCase);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        assert!(ConverterConfig::from_yaml_str("naming: shouting").is_err());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = ConverterConfig {
            naming: NamingStrategy::SnakeCase,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = ConverterConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
