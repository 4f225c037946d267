//! # Aggregate Module
//!
//! Folds per-workflow usage counts into organization-wide statistics.
//!
//! - [`usage`] - [`UsageCount`] for a single workflow file
//! - [`ordering`] - Byte-wise ordering applied at report time
//!
//! The [`Aggregator`] is a plain value: it is mutated one workflow at a time by
//! [`Aggregator::fold`] and can be combined with another aggregator through
//! [`Aggregator::merge`]. Internal maps are unordered; reports sort on the way out.
//!
//! ## Examples
//!
//! ```rust
//! use actionlens::aggregate::{Aggregator, UsageCount, WorkflowUsage};
//! use actionlens::workflow::ActionReference;
//!
//! let mut aggregator = Aggregator::new();
//! let counts: UsageCount = vec![ActionReference::new("actions/checkout", "v4")]
//!     .into_iter()
//!     .collect();
//! aggregator.fold(WorkflowUsage::new("web", ".github/workflows/ci.yml", counts));
//!
//! let (name, totals) = aggregator.most_used().unwrap();
//! assert_eq!(name, "actions/checkout");
//! assert_eq!(totals.total(), 1);
//! ```

pub mod ordering;
pub mod usage;

pub use usage::UsageCount;

use std::collections::{BTreeSet, HashMap};

/// Organization-wide totals for one action name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTotals {
    versions: HashMap<String, u64>,
    repositories: BTreeSet<String>,
    workflow_usages: u64,
    first_seen: usize,
}

impl ActionTotals {
    /// Occurrences across all versions
    pub fn total(&self) -> u64 {
        self.versions.values().sum()
    }

    /// Occurrences per version
    pub fn versions(&self) -> &HashMap<String, u64> {
        &self.versions
    }

    /// Repositories that use this action; only ever grows during a scan
    pub fn repositories(&self) -> &BTreeSet<String> {
        &self.repositories
    }

    /// Occurrence total contributed by referencing workflows
    pub fn workflow_usages(&self) -> u64 {
        self.workflow_usages
    }

    pub fn has_multiple_versions(&self) -> bool {
        self.versions.len() > 1
    }
}

/// The counted references of one workflow file, with its location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowUsage {
    pub repository: String,
    pub path: String,
    pub counts: UsageCount,
}

impl WorkflowUsage {
    pub fn new(repository: impl Into<String>, path: impl Into<String>, counts: UsageCount) -> Self {
        Self {
            repository: repository.into(),
            path: path.into(),
            counts,
        }
    }
}

/// Workflows folded for one repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryUsage {
    pub name: String,
    /// Workflow files discovered, including ones that could not be analysed
    pub discovered_workflows: usize,
    pub workflows: Vec<WorkflowUsage>,
}

impl RepositoryUsage {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Workflow files attributed to this repository
    pub fn workflow_count(&self) -> usize {
        self.discovered_workflows.max(self.workflows.len())
    }
}

/// Accumulates usage statistics across a full organization scan
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    actions: HashMap<String, ActionTotals>,
    repositories: Vec<RepositoryUsage>,
    repository_index: HashMap<String, usize>,
    next_seen: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record how many workflow files a repository has, before or after folding them
    pub fn register_repository(&mut self, name: &str, discovered_workflows: usize) {
        self.repository_mut(name).discovered_workflows = discovered_workflows;
    }

    /// Fold one workflow into every scope
    pub fn fold(&mut self, usage: WorkflowUsage) {
        let next_seen = &mut self.next_seen;
        for (reference, count) in usage.counts.iter() {
            let totals = self
                .actions
                .entry(reference.name.clone())
                .or_insert_with(|| {
                    let first_seen = *next_seen;
                    *next_seen += 1;
                    ActionTotals {
                        first_seen,
                        ..Default::default()
                    }
                });

            *totals.versions.entry(reference.version.clone()).or_insert(0) += count;
            totals.repositories.insert(usage.repository.clone());
            totals.workflow_usages += count;
        }

        tracing::trace!(
            repository = %usage.repository,
            workflow = %usage.path,
            unique = usage.counts.unique(),
            total = usage.counts.total(),
            "Folded workflow"
        );

        self.repository_mut(&usage.repository).workflows.push(usage);
    }

    /// Combine another aggregator into this one.
    ///
    /// Counts and workflow-usage totals are summed and repository sets are unioned.
    /// Names first seen in `other` rank after every name already in `self`.
    /// A repository's discovered workflow count is a registration, not a tally,
    /// so the larger of the two wins.
    pub fn merge(&mut self, other: Aggregator) {
        let mut incoming: Vec<(String, ActionTotals)> = other.actions.into_iter().collect();
        incoming.sort_by_key(|(_, totals)| totals.first_seen);

        for (name, theirs) in incoming {
            match self.actions.get_mut(&name) {
                Some(ours) => {
                    for (version, count) in theirs.versions {
                        *ours.versions.entry(version).or_insert(0) += count;
                    }
                    ours.repositories.extend(theirs.repositories);
                    ours.workflow_usages += theirs.workflow_usages;
                }
                None => {
                    let first_seen = self.next_seen;
                    self.next_seen += 1;
                    self.actions.insert(
                        name,
                        ActionTotals {
                            first_seen,
                            ..theirs
                        },
                    );
                }
            }
        }

        for repository in other.repositories {
            let ours = self.repository_mut(&repository.name);
            ours.discovered_workflows = ours
                .discovered_workflows
                .max(repository.discovered_workflows);
            ours.workflows.extend(repository.workflows);
        }
    }

    fn repository_mut(&mut self, name: &str) -> &mut RepositoryUsage {
        let index = match self.repository_index.get(name) {
            Some(index) => *index,
            None => {
                self.repositories.push(RepositoryUsage::new(name));
                let index = self.repositories.len() - 1;
                self.repository_index.insert(name.to_string(), index);
                index
            }
        };
        &mut self.repositories[index]
    }

    /// Totals keyed by action name (unordered)
    pub fn actions(&self) -> &HashMap<String, ActionTotals> {
        &self.actions
    }

    pub fn action(&self, name: &str) -> Option<&ActionTotals> {
        self.actions.get(name)
    }

    /// Repositories in the order they were first seen
    pub fn repositories(&self) -> &[RepositoryUsage] {
        &self.repositories
    }

    /// Number of workflows folded so far
    pub fn workflows_folded(&self) -> usize {
        self.repositories.iter().map(|r| r.workflows.len()).sum()
    }

    /// Distinct action names
    pub fn unique_actions(&self) -> usize {
        self.actions.len()
    }

    /// Distinct (name, version) pairs
    pub fn unique_action_versions(&self) -> usize {
        self.actions.values().map(|t| t.versions.len()).sum()
    }

    /// Occurrences across the whole organization
    pub fn total_usages(&self) -> u64 {
        self.actions.values().map(ActionTotals::total).sum()
    }

    pub fn actions_with_multiple_versions(&self) -> usize {
        self.actions
            .values()
            .filter(|t| t.has_multiple_versions())
            .count()
    }

    /// The action with the strictly largest total.
    ///
    /// Ties go to the name that was folded first. `None` when nothing was folded.
    pub fn most_used(&self) -> Option<(&str, &ActionTotals)> {
        self.actions
            .iter()
            .max_by(|(_, a), (_, b)| {
                a.total()
                    .cmp(&b.total())
                    .then_with(|| b.first_seen.cmp(&a.first_seen))
            })
            .map(|(name, totals)| (name.as_str(), totals))
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::ActionReference;

    fn usage(repository: &str, path: &str, refs: &[(&str, &str)]) -> WorkflowUsage {
        let counts = refs
            .iter()
            .map(|(name, version)| ActionReference::new(*name, *version))
            .collect();
        WorkflowUsage::new(repository, path, counts)
    }

    #[test]
    fn test_two_repositories_same_action() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(usage("web", "ci.yml", &[("actions/checkout", "v4")]));
        aggregator.fold(usage("api", "ci.yml", &[("actions/checkout", "v4")]));

        let totals = aggregator.action("actions/checkout").unwrap();
        assert_eq!(totals.total(), 2);
        assert_eq!(totals.repositories().len(), 2);
        assert_eq!(totals.workflow_usages(), 2);
    }

    #[test]
    fn test_repository_is_recorded_once() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(usage("web", "a.yml", &[("actions/checkout", "v4")]));
        aggregator.fold(usage("web", "b.yml", &[("actions/checkout", "v4")]));

        let totals = aggregator.action("actions/checkout").unwrap();
        assert_eq!(totals.repositories().len(), 1);
        assert_eq!(totals.total(), 2);
        assert_eq!(aggregator.repositories().len(), 1);
        assert_eq!(aggregator.repositories()[0].workflows.len(), 2);
    }

    #[test]
    fn test_multiple_versions_counted_once() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(usage(
            "web",
            "ci.yml",
            &[("actions/checkout", "v3"), ("actions/checkout", "v4")],
        ));
        assert_eq!(aggregator.actions_with_multiple_versions(), 1);
        assert_eq!(aggregator.unique_actions(), 1);
        assert_eq!(aggregator.unique_action_versions(), 2);
    }

    #[test]
    fn test_workflow_usages_add_occurrences() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(usage(
            "web",
            "ci.yml",
            &[("actions/checkout", "v4"), ("actions/checkout", "v4")],
        ));
        let totals = aggregator.action("actions/checkout").unwrap();
        assert_eq!(totals.workflow_usages(), 2);
        assert_eq!(totals.versions().get("v4"), Some(&2));
    }

    #[test]
    fn test_empty_aggregate() {
        let aggregator = Aggregator::new();
        assert!(aggregator.is_empty());
        assert!(aggregator.most_used().is_none());
        assert_eq!(aggregator.total_usages(), 0);
        assert_eq!(aggregator.unique_actions(), 0);
        assert_eq!(aggregator.workflows_folded(), 0);
    }

    #[test]
    fn test_workflow_without_references_still_recorded() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(usage("docs", "lint.yml", &[]));
        assert!(aggregator.is_empty());
        assert_eq!(aggregator.workflows_folded(), 1);
        assert_eq!(aggregator.repositories()[0].name, "docs");
    }

    #[test]
    fn test_most_used_strictly_largest() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(usage("web", "a.yml", &[("a/a", "v1")]));
        aggregator.fold(usage("web", "b.yml", &[("z/z", "v1"), ("z/z", "v2")]));
        assert_eq!(aggregator.most_used().unwrap().0, "z/z");
    }

    #[test]
    fn test_most_used_tie_goes_to_first_folded() {
        let mut aggregator = Aggregator::new();
        aggregator.fold(usage("web", "a.yml", &[("zeta/action", "v1")]));
        aggregator.fold(usage("web", "b.yml", &[("alpha/action", "v1")]));
        assert_eq!(aggregator.most_used().unwrap().0, "zeta/action");
    }

    #[test]
    fn test_register_repository_without_workflows() {
        let mut aggregator = Aggregator::new();
        aggregator.register_repository("infra", 3);
        assert_eq!(aggregator.repositories()[0].workflow_count(), 3);
        assert!(aggregator.repositories()[0].workflows.is_empty());
    }

    #[test]
    fn test_merge_matches_sequential_fold() {
        let workflows = vec![
            usage("web", "a.yml", &[("actions/checkout", "v4"), ("actions/cache", "v3")]),
            usage("api", "b.yml", &[("actions/checkout", "v3")]),
            usage("api", "c.yml", &[("actions/checkout", "v4"), ("actions/checkout", "v4")]),
        ];

        let mut sequential = Aggregator::new();
        sequential.register_repository("web", 1);
        sequential.register_repository("api", 2);
        for workflow in workflows.clone() {
            sequential.fold(workflow);
        }

        let mut left = Aggregator::new();
        left.register_repository("web", 1);
        left.register_repository("api", 2);
        left.fold(workflows[0].clone());
        left.fold(workflows[1].clone());
        let mut right = Aggregator::new();
        right.register_repository("api", 2);
        right.fold(workflows[2].clone());
        left.merge(right);

        assert_eq!(left.total_usages(), sequential.total_usages());
        assert_eq!(left.unique_action_versions(), sequential.unique_action_versions());
        for (name, totals) in sequential.actions() {
            let merged = left.action(name).unwrap();
            assert_eq!(merged.versions(), totals.versions());
            assert_eq!(merged.repositories(), totals.repositories());
            assert_eq!(merged.workflow_usages(), totals.workflow_usages());
        }
        assert_eq!(left.workflows_folded(), 3);
        assert_eq!(left.most_used().unwrap().0, "actions/checkout");
    }

    #[test]
    fn test_merge_keeps_registered_workflow_count() {
        let mut sequential = Aggregator::new();
        sequential.register_repository("web", 2);
        sequential.fold(usage("web", "a.yml", &[("actions/checkout", "v4")]));
        sequential.fold(usage("web", "b.yml", &[("actions/cache", "v3")]));

        let mut left = Aggregator::new();
        left.register_repository("web", 2);
        left.fold(usage("web", "a.yml", &[("actions/checkout", "v4")]));
        let mut right = Aggregator::new();
        right.register_repository("web", 2);
        right.fold(usage("web", "b.yml", &[("actions/cache", "v3")]));
        left.merge(right);

        assert_eq!(left.repositories().len(), 1);
        assert_eq!(left.repositories()[0].workflow_count(), 2);
        assert_eq!(
            left.repositories()[0].workflow_count(),
            sequential.repositories()[0].workflow_count()
        );
    }

    #[test]
    fn test_merge_orders_new_names_after_existing() {
        let mut left = Aggregator::new();
        left.fold(usage("web", "a.yml", &[("left/action", "v1")]));
        let mut right = Aggregator::new();
        right.fold(usage("api", "b.yml", &[("right/action", "v1")]));
        left.merge(right);
        assert_eq!(left.most_used().unwrap().0, "left/action");
    }
}
