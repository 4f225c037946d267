//! # Report Structures
//!
//! This module defines the report shapes handed to renderers.
//!
//! ## Overview
//!
//! - [`WorkflowInventory`] - Repositories and their workflow files
//! - [`ActionReport`] - Organization-wide action usage with version breakdown
//! - [`DetailedReport`] - Repository → workflow → action hierarchy with a [`Summary`]
//! - [`Report`] - What a scan produced, depending on the requested scope
//!
//! Reports are built by the functions in [`assembly`]; all sibling lists are sorted
//! by name (then version) so identical scans serialize identically, apart from the
//! timing fields.

pub mod assembly;

use serde::{Deserialize, Serialize};

/// A repository and its workflow files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryWorkflows {
    pub name: String,
    pub workflows: Vec<String>,
}

/// Output of a workflow-only scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowInventory {
    pub organization: String,
    pub total_repositories: usize,
    pub repositories_with_workflows: usize,
    pub repositories: Vec<RepositoryWorkflows>,
    pub process_time_seconds: f64,
}

/// Occurrences of one version of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionUsage {
    pub version: String,
    pub count: u64,
}

/// Organization-wide usage of one action name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSummary {
    pub name: String,
    pub total_usages: u64,
    pub repositories_using: usize,
    pub versions: Vec<VersionUsage>,
}

impl ActionSummary {
    pub fn has_multiple_versions(&self) -> bool {
        self.versions.len() > 1
    }
}

/// The action with the largest total usage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MostUsedAction {
    pub name: String,
    pub total_usages: u64,
    pub repositories_using: usize,
    pub workflows_using: u64,
}

/// A workflow file that contributed no references because it could not be analysed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedWorkflow {
    pub repository: String,
    pub path: String,
    pub reason: String,
}

/// Output of an action scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionReport {
    pub organization: String,
    pub total_workflows: usize,
    pub unique_actions: usize,
    pub total_usages: u64,
    pub actions_with_multiple_versions: usize,
    pub most_used_action: Option<MostUsedAction>,
    pub actions: Vec<ActionSummary>,
    pub skipped: Vec<SkippedWorkflow>,
    pub process_time_seconds: f64,
}

/// One (name, version) pair inside a workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionCount {
    pub name: String,
    pub version: String,
    pub count: u64,
}

/// A workflow file and the actions it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub path: String,
    /// Distinct (name, version) pairs
    pub action_count: usize,
    /// Sum of occurrences; differs from `action_count` when a pair repeats
    pub total_action_count: u64,
    pub actions: Vec<ActionCount>,
}

impl WorkflowReport {
    pub fn has_repeats(&self) -> bool {
        self.total_action_count != self.action_count as u64
    }
}

/// A repository with its analysed workflows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub name: String,
    pub workflow_count: usize,
    pub workflows: Vec<WorkflowReport>,
}

/// Organization-wide statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_repositories: usize,
    pub repositories_with_workflows: usize,
    pub total_workflows: usize,
    pub total_action_usages: u64,
    pub unique_actions: usize,
    pub unique_action_versions: usize,
    pub actions_with_multiple_versions: usize,
    pub most_used_action: Option<MostUsedAction>,
}

/// Output of a detailed scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub organization: String,
    pub scan_timestamp: String,
    pub repositories: Vec<RepositoryReport>,
    pub summary: Summary,
    pub skipped: Vec<SkippedWorkflow>,
    pub process_time_seconds: f64,
}

impl DetailedReport {
    /// Number of action rows across all workflows
    pub fn action_rows(&self) -> usize {
        self.repositories
            .iter()
            .flat_map(|r| &r.workflows)
            .map(|w| w.actions.len())
            .sum()
    }
}

/// Everything a scan can produce
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Inventory(WorkflowInventory),
    Actions(ActionReport),
    Combined {
        workflows: WorkflowInventory,
        actions: ActionReport,
    },
    Detailed(DetailedReport),
}

impl Report {
    /// Workflows that could not be analysed
    pub fn skipped(&self) -> &[SkippedWorkflow] {
        match self {
            Report::Inventory(_) => &[],
            Report::Actions(report) => &report.skipped,
            Report::Combined { actions, .. } => &actions.skipped,
            Report::Detailed(report) => &report.skipped,
        }
    }
}
