//! Local provider - An organization checked out on disk
//!
//! The root directory stands for the organization; each immediate subdirectory is
//! a repository whose workflows live under the configured workflow directory.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use super::{is_workflow_file, ContentSource, RepositoryListing};
use crate::config::ScanConfig;
use crate::error::{ActionLensError, ProviderError};

/// Content source reading repositories from a directory tree
pub struct LocalSource {
    root: PathBuf,
    workflow_dir: String,
    extensions: Vec<String>,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>, scan: &ScanConfig) -> Result<Self, ActionLensError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ProviderError::NotADirectory {
                path: root.display().to_string(),
            }
            .into());
        }

        Ok(Self {
            root,
            workflow_dir: scan.workflow_dir.trim_matches('/').to_string(),
            extensions: scan.extensions.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Immediate children of `dir`, without gitignore filtering
    fn children(dir: &Path) -> impl Iterator<Item = ignore::DirEntry> + '_ {
        WalkBuilder::new(dir)
            .max_depth(Some(1))
            .hidden(false)
            .standard_filters(false)
            .build()
            .flatten()
            .filter(move |entry| entry.path() != dir)
    }

    fn repository_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Self::children(&self.root)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_dir()))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name != ".git")
            .collect();
        names.sort();
        names
    }

    fn workflow_paths(&self, repository: &str) -> Vec<String> {
        let dir = self.root.join(repository).join(&self.workflow_dir);
        if !dir.is_dir() {
            return Vec::new();
        }

        let mut paths: Vec<String> = Self::children(&dir)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| is_workflow_file(name, &self.extensions))
            .map(|name| format!("{}/{}", self.workflow_dir, name))
            .collect();
        paths.sort();
        paths
    }
}

#[async_trait::async_trait]
impl ContentSource for LocalSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn list_repositories(
        &self,
        organization: &str,
    ) -> Result<Vec<RepositoryListing>, ActionLensError> {
        tracing::debug!(
            organization,
            root = %self.root.display(),
            "Listing local repositories"
        );

        Ok(self
            .repository_names()
            .into_iter()
            .map(|name| {
                let workflows = self.workflow_paths(&name);
                RepositoryListing::new(name, workflows)
            })
            .collect())
    }

    async fn fetch_workflow(
        &self,
        _organization: &str,
        repository: &str,
        path: &str,
    ) -> Result<String, ActionLensError> {
        let full_path = self.root.join(repository).join(path);
        tokio::fs::read_to_string(&full_path).await.map_err(|e| {
            ProviderError::FileRead {
                path: full_path.display().to_string(),
                source: e,
            }
            .into()
        })
    }
}
