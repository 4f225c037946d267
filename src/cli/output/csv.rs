//! CSV output formatting

use super::ReportRenderer;
use crate::error::ActionLensError;
use crate::report::{ActionReport, DetailedReport, Report, WorkflowInventory};

/// Quote a field, doubling embedded quotes
fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

pub struct CsvOutput;

impl CsvOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_inventory(&self, inventory: &WorkflowInventory) -> String {
        let mut output = String::from("Repository,Workflow Count,Workflow Files\n");
        for repo in &inventory.repositories {
            output.push_str(&format!(
                "{},{},{}\n",
                quote(&repo.name),
                repo.workflows.len(),
                quote(&repo.workflows.join("; "))
            ));
        }
        output
    }

    fn format_actions(&self, report: &ActionReport) -> String {
        let mut output = String::from("Action,Version,Usages,Total\n");
        for action in &report.actions {
            for (i, version) in action.versions.iter().enumerate() {
                let total = if i == 0 {
                    action.total_usages.to_string()
                } else {
                    String::new()
                };
                output.push_str(&format!(
                    "{},{},{},{}\n",
                    quote(&action.name),
                    quote(&format!("@{}", version.version)),
                    version.count,
                    total
                ));
            }
        }
        output
    }

    fn format_detailed(&self, report: &DetailedReport) -> String {
        let mut output = String::from("Repository,Workflow,Action,Version,Count,Total\n");
        for repo in &report.repositories {
            for workflow in &repo.workflows {
                for action in &workflow.actions {
                    output.push_str(&format!(
                        "{},{},{},{},{},{}\n",
                        quote(&repo.name),
                        quote(&workflow.path),
                        quote(&action.name),
                        quote(&action.version),
                        action.count,
                        workflow.total_action_count
                    ));
                }
            }
        }
        output
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for CsvOutput {
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
