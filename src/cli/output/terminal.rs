//! Terminal output formatting with colors

use colored::Colorize;

use super::{percentage, ReportRenderer};
use crate::error::ActionLensError;
use crate::report::{
    ActionReport, DetailedReport, MostUsedAction, Report, SkippedWorkflow, WorkflowInventory,
    WorkflowReport,
};

pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_inventory(&self, inventory: &WorkflowInventory) -> String {
        let mut output = String::new();

        for repo in &inventory.repositories {
            output.push_str(&format!("📁 {}:\n", repo.name.white().bold()));
            for workflow in &repo.workflows {
                output.push_str(&format!("  {} {}\n", "└─".dimmed(), workflow));
            }
            output.push('\n');
        }

        output.push_str(&format!("{}\n", "✅ Scan complete!".green().bold()));
        output.push_str(&format!(
            "📊 Summary: Found {} repositories with workflows out of {} total repositories ({:.1}%).\n",
            inventory.repositories_with_workflows.to_string().cyan(),
            inventory.total_repositories.to_string().cyan(),
            percentage(
                inventory.repositories_with_workflows,
                inventory.total_repositories
            )
        ));
        output.push_str(&format_process_time(inventory.process_time_seconds));
        output
    }

    fn format_actions(&self, report: &ActionReport) -> String {
        let mut output = format!(
            "{}\n{}\n",
            "📋 Action Reference Report".bold(),
            "=".repeat(51).dimmed()
        );

        for action in &report.actions {
            output.push_str(&format!(
                "\n🔧 {} (used {} times)\n",
                action.name.cyan().bold(),
                action.total_usages
            ));
            for version in &action.versions {
                output.push_str(&format!(
                    "   {} @{} ({} times)\n",
                    "└─".dimmed(),
                    version.version.yellow(),
                    version.count
                ));
            }
        }

        output.push_str(&format!("\n{}\n", "📊 Summary:".bold()));
        output.push_str(&format!(
            "   • Total workflows analyzed: {}\n",
            report.total_workflows
        ));
        output.push_str(&format!(
            "   • Unique actions found: {}\n",
            report.unique_actions
        ));
        output.push_str(&format!(
            "   • Total action usages: {}\n",
            report.total_usages
        ));
        output.push_str(&format!(
            "   • Actions with multiple versions: {}\n",
            report.actions_with_multiple_versions
        ));
        if let Some(most_used) = &report.most_used_action {
            output.push_str(&format_most_used(most_used));
        }
        output.push_str(&format_skipped(&report.skipped));
        output.push_str(&format!("   {}", format_process_time(report.process_time_seconds)));
        output
    }

    fn format_workflow(&self, workflow: &WorkflowReport) -> String {
        let heading = if workflow.has_repeats() {
            format!(
                "{} unique, {} total actions",
                workflow.action_count, workflow.total_action_count
            )
        } else {
            format!("{} actions", workflow.action_count)
        };

        let mut output = format!("   📄 {} ({})\n", workflow.path, heading);
        for action in &workflow.actions {
            let reference = format!("{}@{}", action.name, action.version);
            if action.count > 1 {
                output.push_str(&format!(
                    "      🔧 {} ({} times)\n",
                    reference.cyan(),
                    action.count
                ));
            } else {
                output.push_str(&format!("      🔧 {}\n", reference.cyan()));
            }
        }
        output
    }

    fn format_detailed(&self, report: &DetailedReport) -> String {
        let mut output = format!(
            "\n{}\n{}\n",
            "🔍 Detailed Analysis Results".bold(),
            "=".repeat(61).dimmed()
        );

        for repo in &report.repositories {
            output.push_str(&format!(
                "\n📁 {} ({} workflows)\n",
                repo.name.white().bold(),
                repo.workflow_count
            ));
            for workflow in &repo.workflows {
                output.push_str(&self.format_workflow(workflow));
            }
        }

        let summary = &report.summary;
        output.push_str(&format!("\n{}\n", "📊 Summary:".bold()));
        output.push_str(&format!(
            "   • Total repositories: {}\n",
            summary.total_repositories
        ));
        output.push_str(&format!(
            "   • Repositories with workflows: {}\n",
            summary.repositories_with_workflows
        ));
        output.push_str(&format!("   • Total workflows: {}\n", summary.total_workflows));
        output.push_str(&format!(
            "   • Total action usages: {}\n",
            summary.total_action_usages
        ));
        output.push_str(&format!("   • Unique actions: {}\n", summary.unique_actions));
        output.push_str(&format!(
            "   • Unique action versions: {}\n",
            summary.unique_action_versions
        ));
        output.push_str(&format!(
            "   • Actions with multiple versions: {}\n",
            summary.actions_with_multiple_versions
        ));
        if let Some(most_used) = &summary.most_used_action {
            output.push_str(&format_most_used(most_used));
        }
        output.push_str(&format_skipped(&report.skipped));
        output.push_str(&format!("   {}", format_process_time(report.process_time_seconds)));
        output
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

fn format_most_used(most_used: &MostUsedAction) -> String {
    format!(
        "   • Most used action: {} ({} usages across {} repos, {} workflows)\n",
        most_used.name.green().bold(),
        most_used.total_usages,
        most_used.repositories_using,
        most_used.workflows_using
    )
}

fn format_skipped(skipped: &[SkippedWorkflow]) -> String {
    if skipped.is_empty() {
        return String::new();
    }

    let mut output = format!(
        "\n{} ({})\n",
        "⚠️  Skipped workflows".yellow().bold(),
        skipped.len()
    );
    for workflow in skipped {
        output.push_str(&format!(
            "   {} {}/{}: {}\n",
            "•".dimmed(),
            workflow.repository,
            workflow.path,
            workflow.reason.dimmed()
        ));
    }
    output.push('\n');
    output
}

fn format_process_time(seconds: f64) -> String {
    format!("⏱️  Process time: {:.3}s\n", seconds)
}

impl ReportRenderer for TerminalOutput {
    fn render_report(&self, report: &Report) -> Result<String, ActionLensError> {
        Ok(match report {
            Report::Inventory(inventory) => self.format_inventory(inventory),
            Report::Actions(actions) => self.format_actions(actions),
            Report::Combined { workflows, actions } => format!(
                "{}\n{}",
                self.format_inventory(workflows),
                self.format_actions(actions)
            ),
            Report::Detailed(detailed) => self.format_detailed(detailed),
        })
    }
}
