//! Configuration module

pub mod loader;

pub use loader::Config;

use serde::{Deserialize, Serialize};

/// GitHub API configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// GraphQL endpoint
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// Environment variables checked for a token, in order
    #[serde(default = "default_token_env")]
    pub token_env: Vec<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            graphql_url: default_graphql_url(),
            token_env: default_token_env(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_graphql_url() -> String {
    "https://api.github.com/graphql".to_string()
}

fn default_token_env() -> Vec<String> {
    vec!["GITHUB_TOKEN".to_string(), "GH_TOKEN".to_string()]
}

/// Scan configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory holding workflow files, relative to the repository root
    #[serde(default = "default_workflow_dir")]
    pub workflow_dir: String,

    /// Git ref whose tree is listed
    #[serde(default = "default_git_ref")]
    pub git_ref: String,

    /// File extensions treated as workflow files
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Repositories requested per GraphQL page (1..=100)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Workflow files fetched concurrently
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            workflow_dir: default_workflow_dir(),
            git_ref: default_git_ref(),
            extensions: default_extensions(),
            page_size: default_page_size(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_workflow_dir() -> String {
    ".github/workflows".to_string()
}

fn default_git_ref() -> String {
    "HEAD".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["yml".to_string(), "yaml".to_string()]
}

fn default_page_size() -> u32 {
    50
}

fn default_concurrency() -> usize {
    8
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format (default, json, table, csv)
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

fn default_format() -> String {
    "default".to_string()
}
