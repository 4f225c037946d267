//! Scanner module - Organization scan orchestration
//!
//! A scan runs in three phases:
//!
//! 1. Discovery: the [`ContentSource`] lists repositories and their workflow files.
//! 2. Analysis: workflow files are fetched with bounded concurrency, parsed, and
//!    folded into an [`Aggregator`] in discovery order.
//! 3. Assembly: the aggregate becomes the [`Report`] for the requested scope.
//!
//! A workflow that cannot be fetched or parsed is recorded as a [`SkippedWorkflow`]
//! and the scan continues. Only a discovery failure aborts the scan.

use chrono::Utc;
use clap::ValueEnum;
use futures::stream::{self, StreamExt};
use std::sync::Arc;

use crate::aggregate::{Aggregator, UsageCount, WorkflowUsage};
use crate::error::ActionLensError;
use crate::providers::{ContentSource, Discovery};
use crate::report::{assembly, Report, SkippedWorkflow};
use crate::utils::{ScanPhase, ScanTiming, Timer};
use crate::workflow::WorkflowDocument;

/// What a scan reports on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScanScope {
    /// Repositories and their workflow files
    Workflows,
    /// Action usage across all workflows
    Actions,
    /// Both of the above
    #[default]
    All,
}

impl ScanScope {
    /// Whether workflow files must be fetched and analysed
    pub fn needs_analysis(self) -> bool {
        !matches!(self, ScanScope::Workflows)
    }
}

/// Parameters of one scan
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub organization: String,
    pub scope: ScanScope,
    pub detailed: bool,
}

impl ScanRequest {
    pub fn new(organization: impl Into<String>, scope: ScanScope, detailed: bool) -> Self {
        Self {
            organization: organization.into(),
            scope,
            detailed,
        }
    }
}

/// A finished scan
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub report: Report,
    pub timing: ScanTiming,
}

/// Result of the analysis phase
#[derive(Debug, Default)]
pub struct Analysis {
    pub aggregator: Aggregator,
    pub skipped: Vec<SkippedWorkflow>,
}

/// Scans one organization through a content source
pub struct OrgScanner {
    source: Arc<dyn ContentSource>,
    concurrency: usize,
}

impl OrgScanner {
    pub fn new(source: Arc<dyn ContentSource>, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    /// List repositories and workflow files
    pub async fn discover(&self, organization: &str) -> Result<Discovery, ActionLensError> {
        let repositories = self.source.list_repositories(organization).await?;
        let discovery = Discovery::new(repositories);

        tracing::info!(
            source = self.source.name(),
            organization,
            repositories = discovery.total_repositories(),
            with_workflows = discovery.repositories_with_workflows(),
            workflows = discovery.total_workflows(),
            "Discovery complete"
        );
        Ok(discovery)
    }

    /// Fetch, parse and fold every discovered workflow
    pub async fn analyse(&self, organization: &str, discovery: &Discovery) -> Analysis {
        let fetches = discovery.workflow_files().map(|(repository, path)| async move {
            let fetched = self
                .source
                .fetch_workflow(organization, repository, path)
                .await;
            (repository, path, fetched)
        });

        let mut analysis = Analysis::default();
        for repo in discovery.repositories.iter().filter(|r| r.has_workflows()) {
            analysis
                .aggregator
                .register_repository(&repo.name, repo.workflows.len());
        }

        // `buffered` yields in input order, so the fold below is deterministic.
        let results = stream::iter(fetches).buffered(self.concurrency);
        futures::pin_mut!(results);

        while let Some((repository, path, fetched)) = results.next().await {
            match analyse_workflow(fetched) {
                Ok(counts) => {
                    tracing::debug!(
                        repository,
                        path,
                        references = counts.total(),
                        "Analysed workflow"
                    );
                    analysis
                        .aggregator
                        .fold(WorkflowUsage::new(repository, path, counts));
                }
                Err(reason) => {
                    tracing::warn!(repository, path, %reason, "Skipping workflow");
                    analysis.skipped.push(SkippedWorkflow {
                        repository: repository.to_string(),
                        path: path.to_string(),
                        reason,
                    });
                }
            }
        }

        analysis
    }

    /// Run a full scan and assemble the report for the requested scope
    pub async fn scan(&self, request: &ScanRequest) -> Result<ScanOutcome, ActionLensError> {
        let started_at = Utc::now();
        let total = Timer::start();
        let mut timing = ScanTiming::new();
        let organization = request.organization.as_str();

        let phase = Timer::start();
        let discovery = self.discover(organization).await?;
        timing.record(ScanPhase::Discovery, phase.elapsed());

        let analysis = if request.scope.needs_analysis() {
            let phase = Timer::start();
            let analysis = self.analyse(organization, &discovery).await;
            timing.record(ScanPhase::Analysis, phase.elapsed());
            analysis
        } else {
            Analysis::default()
        };

        let phase = Timer::start();
        let Analysis {
            aggregator,
            skipped,
        } = analysis;
        let elapsed = total.elapsed();

        // The inventory never looks inside workflow files, detailed or not.
        let report = match request.scope {
            ScanScope::Workflows => {
                Report::Inventory(assembly::inventory(organization, &discovery, elapsed))
            }
            _ if request.detailed => Report::Detailed(assembly::detailed_report(
                organization,
                &discovery,
                &aggregator,
                skipped,
                started_at,
                elapsed,
            )),
            ScanScope::Actions => Report::Actions(assembly::action_report(
                organization,
                &aggregator,
                discovery.total_workflows(),
                skipped,
                elapsed,
            )),
            ScanScope::All => Report::Combined {
                workflows: assembly::inventory(organization, &discovery, elapsed),
                actions: assembly::action_report(
                    organization,
                    &aggregator,
                    discovery.total_workflows(),
                    skipped,
                    elapsed,
                ),
            },
        };
        timing.record(ScanPhase::Assembly, phase.elapsed());
        timing.set_total(total.elapsed());

        tracing::info!(
            organization,
            unique_actions = aggregator.unique_actions(),
            usages = aggregator.total_usages(),
            skipped = report.skipped().len(),
            "Scan complete in {}",
            timing.summary()
        );

        Ok(ScanOutcome { report, timing })
    }
}

/// Turn fetched text into per-workflow counts, or the reason it was skipped
fn analyse_workflow(fetched: Result<String, ActionLensError>) -> Result<UsageCount, String> {
    let text = fetched.map_err(|e| e.to_string())?;
    let document = WorkflowDocument::parse(&text).map_err(|e| e.to_string())?;
    Ok(UsageCount::from_document(&document))
}
