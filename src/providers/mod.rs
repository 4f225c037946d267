//! # Providers Module
//!
//! Content sources that supply repositories and workflow files to the scanner.
//!
//! - [`github`] - GitHub GraphQL discovery and REST contents
//! - [`local`] - A directory tree laid out as `<org>/<repo>/.github/workflows`
//!
//! A source only lists and fetches. Parsing, extraction and aggregation happen in
//! the scanner, which treats any fetch failure as a skipped workflow.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use actionlens::config::Config;
//! use actionlens::providers::{local::LocalSource, ContentSource};
//!
//! # async fn run() -> Result<(), actionlens::ActionLensError> {
//! let config = Config::default();
//! let source = LocalSource::new("./org-checkout", &config.scan)?;
//! let repositories = source.list_repositories("acme").await?;
//! println!("{} repositories", repositories.len());
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod local;

use crate::error::ActionLensError;

/// A repository and the workflow files found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryListing {
    pub name: String,
    /// Paths relative to the repository root
    pub workflows: Vec<String>,
}

impl RepositoryListing {
    pub fn new(name: impl Into<String>, workflows: Vec<String>) -> Self {
        Self {
            name: name.into(),
            workflows,
        }
    }

    pub fn has_workflows(&self) -> bool {
        !self.workflows.is_empty()
    }
}

/// Supplies repository listings and raw workflow text
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Every repository of the organization, with or without workflows
    async fn list_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RepositoryListing>, ActionLensError>;

    /// Raw text of one workflow file
    async fn fetch_workflow(
        &self,
        organization: &str,
        repository: &str,
        path: &str,
    ) -> Result<String, ActionLensError>;
}

/// The repositories of one organization as reported by a source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub repositories: Vec<RepositoryListing>,
}

impl Discovery {
    pub fn new(repositories: Vec<RepositoryListing>) -> Self {
        Self { repositories }
    }

    pub fn total_repositories(&self) -> usize {
        self.repositories.len()
    }

    pub fn repositories_with_workflows(&self) -> usize {
        self.repositories.iter().filter(|r| r.has_workflows()).count()
    }

    pub fn total_workflows(&self) -> usize {
        self.repositories.iter().map(|r| r.workflows.len()).sum()
    }

    /// Every (repository, path) pair in discovery order
    pub fn workflow_files(&self) -> impl Iterator<Item = (&str, &str)> {
        self.repositories.iter().flat_map(|repo| {
            repo.workflows
                .iter()
                .map(move |path| (repo.name.as_str(), path.as_str()))
        })
    }
}

/// Whether a file name ends with one of the workflow extensions.
///
/// A name that is only the extension, such as `.yml`, counts too.
pub fn is_workflow_file(name: &str, extensions: &[String]) -> bool {
    extensions
        .iter()
        .any(|ext| name.ends_with(&format!(".{}", ext.trim_start_matches('.'))))
}
