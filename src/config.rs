use std::path::Path;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    motion::AnalysisConfig,
};

/// Main configuration for StepFlow motion scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analysis constants: intervals, scales, weights and feedback thresholds
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Result reporting settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()
            .map_err(|reason| ConfigError::InvalidValue {
                key: "analysis".to_string(),
                value: reason
            })?;
        self.output.validate()?;
        Ok(())
    }
}

/// Result reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Scoring model version stamped on every result
    pub model_version: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            model_version: "1.0.0".to_string(),
            pretty: false,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if self.model_version.trim().is_empty() {
            return Err(ConfigError::MissingKey {
                key: "output.model_version".to_string()
            }.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test_config.toml");

        let mut original_config = Config::default();
        original_config.analysis.thresholds.sync_warning = 0.65;
        original_config.output.model_version = "1.1.0".to_string();

        original_config.save_to_file(&file_path).unwrap();
        let loaded_config = Config::from_file(&file_path).unwrap();

        assert_eq!(original_config.analysis, loaded_config.analysis);
        assert_eq!(loaded_config.output.model_version, "1.1.0");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("partial.toml");
        std::fs::write(&file_path, "[output]\nmodel_version = \"2.0.0\"\npretty = true\n").unwrap();

        let config = Config::from_file(&file_path).unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_invalid_weights() {
        let mut config = Config::default();
        config.analysis.weights.form = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_model_version() {
        let mut config = Config::default();
        config.output.model_version = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        assert!(Config::from_file(dir.path().join("nope.toml")).is_err());
    }
}
