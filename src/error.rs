//! Error types for ActionLens
//!
//! This module defines custom error types using `thiserror` for better error handling
//! and more descriptive error messages throughout the application.
//!
//! Only collaborator failures live here. The extraction and aggregation core never
//! fails: malformed references are dropped and unparseable documents are recorded
//! as skipped workflows by the scanner.

use thiserror::Error;

/// Main error type for ActionLens
#[derive(Error, Debug)]
pub enum ActionLensError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Content source errors (GitHub API, local filesystem)
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Report output errors
    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    /// Invalid command-line arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Errors that occur while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        /// Path to the configuration file
        path: String,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The configuration file does not exist
    #[error("Config file not found: {path}")]
    NotFound { path: String },

    /// Failed to parse the configuration file
    #[error("Failed to parse config: {message}")]
    Parse { message: String },

    /// Failed to serialize the configuration
    #[error("Failed to serialize config: {message}")]
    Serialize { message: String },

    /// A configuration value is out of range or malformed
    #[error("Invalid value for '{field}': {message}")]
    Invalid { field: String, message: String },
}

/// Errors raised by content sources
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No GitHub token could be resolved
    #[error(
        "GitHub token not found. Set GITHUB_TOKEN or GH_TOKEN, or authenticate with 'gh auth login'"
    )]
    MissingToken,

    /// Transport-level HTTP failure
    #[error("HTTP request failed: {message}")]
    Http { message: String },

    /// The API answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// The GraphQL API returned errors
    #[error("GraphQL query failed: {message}")]
    GraphQl { message: String },

    /// The organization does not exist or is not visible to the token
    #[error("Organization '{organization}' not found or not accessible")]
    OrganizationNotFound { organization: String },

    /// Failed to read a local file
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// A local source root is not a directory
    #[error("Not a directory: {path}")]
    NotADirectory { path: String },
}

/// Errors raised while writing reports
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to write the report file
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize the report
    #[error("Failed to serialize report: {message}")]
    Serialize { message: String },
}

/// A workflow file that could not be turned into a document tree
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<std::io::Error> for ActionLensError {
    fn from(err: std::io::Error) -> Self {
        ActionLensError::Output(OutputError::FileWrite {
            path: "unknown".to_string(),
            source: err,
        })
    }
}

impl From<serde_json::Error> for ActionLensError {
    fn from(err: serde_json::Error) -> Self {
        ActionLensError::Output(OutputError::Serialize {
            message: err.to_string(),
        })
    }
}

impl From<toml::de::Error> for ActionLensError {
    fn from(err: toml::de::Error) -> Self {
        ActionLensError::Config(ConfigError::Parse {
            message: err.to_string(),
        })
    }
}

impl From<toml::ser::Error> for ActionLensError {
    fn from(err: toml::ser::Error) -> Self {
        ActionLensError::Config(ConfigError::Serialize {
            message: err.to_string(),
        })
    }
}

impl From<reqwest::Error> for ActionLensError {
    fn from(err: reqwest::Error) -> Self {
        ActionLensError::Provider(ProviderError::Http {
            message: err.to_string(),
        })
    }
}
