//! Configuration management for the ATS match client

use crate::error::{AtsMatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "ats-match";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub analysis_path: String,
    pub industries_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                base_url: "http://localhost:8080".to_string(),
                analysis_path: "/api/analysis".to_string(),
                industries_path: "/api/analysis/industries".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from `path`, writing defaults there first if nothing exists yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| AtsMatchError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AtsMatchError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        Self::app_dir().join("config.toml")
    }

    /// Per-user directory holding config and persisted state.
    pub fn app_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join(APP_DIR)
    }

    /// Set a single value by dotted key, e.g. `service.base_url`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "service.base_url" => self.service.base_url = value.to_string(),
            "service.analysis_path" => self.service.analysis_path = value.to_string(),
            "service.industries_path" => self.service.industries_path = value.to_string(),
            "output.format" => self.output.format = parse_output_format(value)?,
            "output.color_output" => {
                self.output.color_output = value.parse().map_err(|_| {
                    AtsMatchError::Configuration(format!(
                        "Expected true or false for {}, got '{}'",
                        key, value
                    ))
                })?
            }
            _ => {
                return Err(AtsMatchError::Configuration(format!(
                    "Unknown configuration key: {}",
                    key
                )))
            }
        }
        Ok(())
    }
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(AtsMatchError::Configuration(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_set_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.set("service.base_url", "https://ats.example.com").unwrap();
        config.set("output.format", "JSON").unwrap();
        config.set("output.color_output", "false").unwrap();
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.service.base_url, "https://ats.example.com");
        assert_eq!(reloaded.output.format, OutputFormat::Json);
        assert!(!reloaded.output.color_output);
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("service.timeout", "10").is_err());
        assert!(config.set("output.format", "pdf").is_err());
        assert!(config.set("output.color_output", "maybe").is_err());
    }

    #[test]
    fn test_garbage_file_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "service = 3").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(AtsMatchError::Configuration(_))
        ));
    }
}
