//! Configuration loader

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ActionLensError, ConfigError};

use super::{GitHubConfig, OutputConfig, ScanConfig};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILENAME: &str = ".actionlens.toml";

/// Formats accepted by `[output] format`
const OUTPUT_FORMATS: [&str; 4] = ["default", "json", "table", "csv"];

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GitHub API configuration
    #[serde(default)]
    pub github: GitHubConfig,

    /// Scan configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load from an explicit path, or from the working directory, or fall back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self, ActionLensError> {
        match path {
            Some(path) if !path.exists() => Err(ConfigError::NotFound {
                path: path.display().to_string(),
            }
            .into()),
            Some(path) => Self::load_from_file(path),
            None => Self::load_or_default(),
        }
    }

    /// Load configuration from file or return default
    pub fn load_or_default() -> Result<Self, ActionLensError> {
        let config_path = Path::new(CONFIG_FILENAME);

        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ActionLensError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ActionLensError::Config(ConfigError::FileRead {
                path: path.display().to_string(),
                source: e,
            })
        })?;

        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ActionLensError> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Check value ranges and URL syntax
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("github.api_url", &self.github.api_url),
            ("github.graphql_url", &self.github.graphql_url),
        ] {
            url::Url::parse(value).map_err(|e| invalid(field, e.to_string()))?;
        }

        if !(1..=100).contains(&self.scan.page_size) {
            return Err(invalid("scan.page_size", "must be between 1 and 100"));
        }
        if self.scan.concurrency == 0 {
            return Err(invalid("scan.concurrency", "must be at least 1"));
        }
        if self.scan.extensions.is_empty() {
            return Err(invalid("scan.extensions", "must not be empty"));
        }
        if self.scan.workflow_dir.trim_matches('/').is_empty() {
            return Err(invalid("scan.workflow_dir", "must not be empty"));
        }
        if !OUTPUT_FORMATS.contains(&self.output.format.as_str()) {
            return Err(invalid(
                "output.format",
                format!("expected one of {}", OUTPUT_FORMATS.join(", ")),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.into(),
    }
}
