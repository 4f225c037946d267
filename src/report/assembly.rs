//! Report assembly
//!
//! Pure functions from discovery results and a finished [`Aggregator`] to report
//! structures. Ordering is applied here and only here.

use chrono::{DateTime, SecondsFormat, Utc};
use std::time::Duration;

use super::{
    ActionCount, ActionReport, ActionSummary, DetailedReport, MostUsedAction, RepositoryReport,
    RepositoryWorkflows, SkippedWorkflow, Summary, VersionUsage, WorkflowInventory,
    WorkflowReport,
};
use crate::aggregate::ordering::{ordered_names, ordered_versions, sort_by_key_str};
use crate::aggregate::{Aggregator, WorkflowUsage};
use crate::providers::Discovery;

/// Repositories that have at least one workflow file
pub fn inventory(organization: &str, discovery: &Discovery, elapsed: Duration) -> WorkflowInventory {
    let mut repositories: Vec<RepositoryWorkflows> = discovery
        .repositories
        .iter()
        .filter(|repo| repo.has_workflows())
        .map(|repo| {
            let mut workflows = repo.workflows.clone();
            workflows.sort();
            RepositoryWorkflows {
                name: repo.name.clone(),
                workflows,
            }
        })
        .collect();
    sort_by_key_str(&mut repositories, |repo| repo.name.as_str());

    WorkflowInventory {
        organization: organization.to_string(),
        total_repositories: discovery.total_repositories(),
        repositories_with_workflows: discovery.repositories_with_workflows(),
        repositories,
        process_time_seconds: elapsed.as_secs_f64(),
    }
}

/// Per-action totals, sorted by name with versions sorted inside each action
pub fn action_summaries(aggregator: &Aggregator) -> Vec<ActionSummary> {
    let actions = aggregator.actions();
    ordered_names(actions.keys())
        .into_iter()
        .filter_map(|name| actions.get(name).map(|totals| (name, totals)))
        .map(|(name, totals)| ActionSummary {
            name: name.to_string(),
            total_usages: totals.total(),
            repositories_using: totals.repositories().len(),
            versions: ordered_versions(totals.versions())
                .into_iter()
                .map(|(version, count)| VersionUsage {
                    version: version.to_string(),
                    count,
                })
                .collect(),
        })
        .collect()
}

/// The most used action, absent for an empty aggregate
pub fn most_used_action(aggregator: &Aggregator) -> Option<MostUsedAction> {
    aggregator
        .most_used()
        .map(|(name, totals)| MostUsedAction {
            name: name.to_string(),
            total_usages: totals.total(),
            repositories_using: totals.repositories().len(),
            workflows_using: totals.workflow_usages(),
        })
}

/// Organization-wide action report
pub fn action_report(
    organization: &str,
    aggregator: &Aggregator,
    total_workflows: usize,
    skipped: Vec<SkippedWorkflow>,
    elapsed: Duration,
) -> ActionReport {
    ActionReport {
        organization: organization.to_string(),
        total_workflows,
        unique_actions: aggregator.unique_actions(),
        total_usages: aggregator.total_usages(),
        actions_with_multiple_versions: aggregator.actions_with_multiple_versions(),
        most_used_action: most_used_action(aggregator),
        actions: action_summaries(aggregator),
        skipped,
        process_time_seconds: elapsed.as_secs_f64(),
    }
}

/// Summary statistics combining discovery counts with the aggregate
pub fn summary(aggregator: &Aggregator, discovery: &Discovery) -> Summary {
    Summary {
        total_repositories: discovery.total_repositories(),
        repositories_with_workflows: discovery.repositories_with_workflows(),
        total_workflows: discovery.total_workflows(),
        total_action_usages: aggregator.total_usages(),
        unique_actions: aggregator.unique_actions(),
        unique_action_versions: aggregator.unique_action_versions(),
        actions_with_multiple_versions: aggregator.actions_with_multiple_versions(),
        most_used_action: most_used_action(aggregator),
    }
}

fn workflow_report(usage: &WorkflowUsage) -> WorkflowReport {
    WorkflowReport {
        path: usage.path.clone(),
        action_count: usage.counts.unique(),
        total_action_count: usage.counts.total(),
        actions: usage
            .counts
            .iter()
            .map(|(reference, count)| ActionCount {
                name: reference.name.clone(),
                version: reference.version.clone(),
                count,
            })
            .collect(),
    }
}

/// Repository → workflow → action hierarchy, each level sorted
pub fn repository_reports(aggregator: &Aggregator) -> Vec<RepositoryReport> {
    let mut repositories: Vec<RepositoryReport> = aggregator
        .repositories()
        .iter()
        .map(|repo| {
            let mut workflows: Vec<WorkflowReport> =
                repo.workflows.iter().map(workflow_report).collect();
            sort_by_key_str(&mut workflows, |workflow| workflow.path.as_str());
            RepositoryReport {
                name: repo.name.clone(),
                workflow_count: repo.workflow_count(),
                workflows,
            }
        })
        .collect();
    sort_by_key_str(&mut repositories, |repo| repo.name.as_str());
    repositories
}

/// Full detailed report
pub fn detailed_report(
    organization: &str,
    discovery: &Discovery,
    aggregator: &Aggregator,
    skipped: Vec<SkippedWorkflow>,
    started_at: DateTime<Utc>,
    elapsed: Duration,
) -> DetailedReport {
    DetailedReport {
        organization: organization.to_string(),
        scan_timestamp: started_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        repositories: repository_reports(aggregator),
        summary: summary(aggregator, discovery),
        skipped,
        process_time_seconds: elapsed.as_secs_f64(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::UsageCount;
    use crate::providers::RepositoryListing;
    use crate::workflow::ActionReference;
    use pretty_assertions::assert_eq;

    fn counts(refs: &[(&str, &str)]) -> UsageCount {
        refs.iter()
            .map(|(name, version)| ActionReference::new(*name, *version))
            .collect()
    }

    fn sample_aggregator() -> Aggregator {
        let mut aggregator = Aggregator::new();
        aggregator.register_repository("web", 2);
        aggregator.fold(WorkflowUsage::new(
            "web",
            ".github/workflows/ci.yml",
            counts(&[
                ("actions/setup-node", "v4"),
                ("actions/checkout", "v4"),
                ("actions/checkout", "v4"),
            ]),
        ));
        aggregator.fold(WorkflowUsage::new(
            "web",
            ".github/workflows/a.yml",
            counts(&[("actions/checkout", "v3")]),
        ));
        aggregator.register_repository("api", 1);
        aggregator.fold(WorkflowUsage::new(
            "api",
            ".github/workflows/ci.yml",
            counts(&[("actions/checkout", "v4")]),
        ));
        aggregator
    }

    fn sample_discovery() -> Discovery {
        Discovery::new(vec![
            RepositoryListing::new(
                "web",
                vec![
                    ".github/workflows/ci.yml".to_string(),
                    ".github/workflows/a.yml".to_string(),
                ],
            ),
            RepositoryListing::new("docs", vec![]),
            RepositoryListing::new("api", vec![".github/workflows/ci.yml".to_string()]),
        ])
    }

    #[test]
    fn test_action_summaries_sorted() {
        let summaries = action_summaries(&sample_aggregator());
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["actions/checkout", "actions/setup-node"]);

        let checkout = &summaries[0];
        assert_eq!(checkout.total_usages, 4);
        assert_eq!(checkout.repositories_using, 2);
        assert_eq!(
            checkout.versions,
            vec![
                VersionUsage {
                    version: "v3".to_string(),
                    count: 1
                },
                VersionUsage {
                    version: "v4".to_string(),
                    count: 3
                },
            ]
        );
        assert!(checkout.has_multiple_versions());
    }

    #[test]
    fn test_summary() {
        let summary = summary(&sample_aggregator(), &sample_discovery());
        assert_eq!(
            summary,
            Summary {
                total_repositories: 3,
                repositories_with_workflows: 2,
                total_workflows: 3,
                total_action_usages: 5,
                unique_actions: 2,
                unique_action_versions: 3,
                actions_with_multiple_versions: 1,
                most_used_action: Some(MostUsedAction {
                    name: "actions/checkout".to_string(),
                    total_usages: 4,
                    repositories_using: 2,
                    workflows_using: 4,
                }),
            }
        );
    }

    #[test]
    fn test_empty_summary_has_no_most_used() {
        let summary = summary(&Aggregator::new(), &Discovery::default());
        assert_eq!(summary, Summary::default());
        assert!(summary.most_used_action.is_none());
    }

    #[test]
    fn test_repository_reports_hierarchy() {
        let reports = repository_reports(&sample_aggregator());
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "api");
        assert_eq!(reports[1].name, "web");

        let web = &reports[1];
        assert_eq!(web.workflow_count, 2);
        assert_eq!(web.workflows[0].path, ".github/workflows/a.yml");
        let ci = &web.workflows[1];
        assert_eq!(ci.action_count, 2);
        assert_eq!(ci.total_action_count, 3);
        assert!(ci.has_repeats());
        assert_eq!(ci.actions[0].name, "actions/checkout");
        assert_eq!(ci.actions[0].count, 2);
    }

    #[test]
    fn test_assembly_is_idempotent() {
        let aggregator = sample_aggregator();
        let first = serde_json::to_string(&action_summaries(&aggregator)).unwrap();
        let second = serde_json::to_string(&action_summaries(&aggregator)).unwrap();
        assert_eq!(first, second);

        let first = serde_json::to_string(&repository_reports(&aggregator)).unwrap();
        let second = serde_json::to_string(&repository_reports(&aggregator)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_inventory_lists_only_repositories_with_workflows() {
        let inventory = inventory("acme", &sample_discovery(), Duration::from_millis(1500));
        assert_eq!(inventory.total_repositories, 3);
        assert_eq!(inventory.repositories_with_workflows, 2);
        assert_eq!(inventory.repositories[0].name, "api");
        assert_eq!(
            inventory.repositories[1].workflows,
            vec![
                ".github/workflows/a.yml".to_string(),
                ".github/workflows/ci.yml".to_string()
            ]
        );
        assert!((inventory.process_time_seconds - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_detailed_report_timestamp() {
        let started_at = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let report = detailed_report(
            "acme",
            &sample_discovery(),
            &sample_aggregator(),
            vec![],
            started_at,
            Duration::ZERO,
        );
        assert_eq!(report.scan_timestamp, "2024-05-01T12:00:00Z");
        assert_eq!(report.action_rows(), 4);
    }
}
