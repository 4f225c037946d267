//! Box-drawing table output

use super::{average, percentage, ReportRenderer};
use crate::error::ActionLensError;
use crate::report::{ActionReport, DetailedReport, Report, SkippedWorkflow, WorkflowInventory};

const BANNER_WIDTH: usize = 100;

/// A bordered table whose rows are grouped; groups are separated by a rule
struct Table {
    headers: Vec<&'static str>,
    widths: Vec<usize>,
    groups: Vec<Vec<Vec<String>>>,
}

impl Table {
    fn new(columns: &[(&'static str, usize)]) -> Self {
        Self {
            headers: columns.iter().map(|(header, _)| *header).collect(),
            widths: columns.iter().map(|(_, width)| *width).collect(),
            groups: Vec::new(),
        }
    }

    fn push_group(&mut self, rows: Vec<Vec<String>>) {
        if !rows.is_empty() {
            self.groups.push(rows);
        }
    }

    fn rule(&self, left: char, middle: char, right: char) -> String {
        let segments: Vec<String> = self.widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(&middle.to_string()), right)
    }

    fn row(&self, cells: &[String]) -> String {
        let padded: Vec<String> = self
            .widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                let cell = truncate(cell, *width);
                let padding = width.saturating_sub(cell.chars().count());
                format!(" {}{} ", cell, " ".repeat(padding))
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    }

    fn render(&self) -> String {
        let headers: Vec<String> = self.headers.iter().map(|h| h.to_string()).collect();
        let mut output = self.rule('┌', '┬', '┐');
        output.push_str(&self.row(&headers));
        output.push_str(&self.rule('├', '┼', '┤'));

        for (i, group) in self.groups.iter().enumerate() {
            if i > 0 {
                output.push_str(&self.rule('├', '┼', '┤'));
            }
            for cells in group {
                output.push_str(&self.row(cells));
            }
        }

        output.push_str(&self.rule('└', '┴', '┘'));
        output
    }
}

/// Shorten to at most `max` characters, marking the cut with "..."
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut truncated: String = value.chars().take(keep).collect();
    truncated.push_str("...");
    truncated
}

fn banner(title: &str) -> String {
    let padding = BANNER_WIDTH.saturating_sub(title.chars().count());
    let left = padding / 2;
    format!(
        "╔{bar}╗\n║{}{}{}║\n╚{bar}╝\n",
        " ".repeat(left),
        title,
        " ".repeat(padding - left),
        bar = "═".repeat(BANNER_WIDTH)
    )
}

fn empty_box(message: &str) -> String {
    let width = message.chars().count() + 6;
    format!(
        "┌{bar}┐\n│   {}   │\n└{bar}┘\n",
        message,
        bar = "─".repeat(width)
    )
}

fn closing_rule() -> String {
    format!(" {}\n\n", "═".repeat(BANNER_WIDTH))
}

fn skipped_table(skipped: &[SkippedWorkflow]) -> String {
    if skipped.is_empty() {
        return String::new();
    }
    let mut table = Table::new(&[("SKIPPED REPOSITORY", 24), ("WORKFLOW", 36), ("REASON", 34)]);
    table.push_group(
        skipped
            .iter()
            .map(|s| vec![s.repository.clone(), s.path.clone(), s.reason.clone()])
            .collect(),
    );
    format!("\n{}", table.render())
}

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_inventory(&self, inventory: &WorkflowInventory) -> String {
        let mut output = banner("WORKFLOW SCAN RESULTS");
        output.push_str(&format!("  Organization: {}\n", inventory.organization));
        output.push_str(&format!(
            "  Total Repositories: {}\n",
            inventory.total_repositories
        ));
        output.push_str(&format!(
            "  Repositories with Workflows: {}\n",
            inventory.repositories_with_workflows
        ));
        output.push_str(&format!(
            "  Summary: {}/{} repositories have GitHub Actions workflows ({:.1}%)\n",
            inventory.repositories_with_workflows,
            inventory.total_repositories,
            percentage(
                inventory.repositories_with_workflows,
                inventory.total_repositories
            )
        ));
        output.push_str(&closing_rule());

        if inventory.repositories.is_empty() {
            output.push_str(&empty_box("No repositories with workflows found"));
            return output;
        }

        let mut table = Table::new(&[("REPOSITORY", 27), ("WORKFLOW FILES", 59), ("COUNT", 7)]);
        for repo in &inventory.repositories {
            table.push_group(vec![vec![
                repo.name.clone(),
                repo.workflows.join(", "),
                repo.workflows.len().to_string(),
            ]]);
        }
        output.push_str(&table.render());
        output.push('\n');
        output
    }

    fn format_actions(&self, report: &ActionReport) -> String {
        let mut output = banner("GITHUB ACTIONS SCAN RESULTS");
        output.push_str(&format!(
            "  Total Workflows Analyzed: {}\n",
            report.total_workflows
        ));
        output.push_str(&format!(
            "  Unique Actions Found: {}\n",
            report.unique_actions
        ));
        output.push_str(&format!(
            "  Total Action Usages: {}\n",
            report.total_usages
        ));
        output.push_str(&format!(
            "  Average usages per action: {:.1}\n",
            average(report.total_usages, report.unique_actions)
        ));
        if let Some(most_used) = &report.most_used_action {
            output.push_str(&format!(
                "  Most used action: {} ({} usages)\n",
                most_used.name, most_used.total_usages
            ));
        }
        output.push_str(&format!(
            "  Actions with multiple versions: {}\n",
            report.actions_with_multiple_versions
        ));
        output.push_str(&closing_rule());

        if report.actions.is_empty() {
            output.push_str(&empty_box("No actions found."));
            output.push_str(&skipped_table(&report.skipped));
            return output;
        }

        let mut table = Table::new(&[
            ("ACTION NAME", 66),
            ("VERSION", 11),
            ("USAGES", 7),
            ("TOTAL", 5),
        ]);
        for action in &report.actions {
            let rows = action
                .versions
                .iter()
                .enumerate()
                .map(|(i, version)| {
                    let (name, total) = if i == 0 {
                        (action.name.clone(), action.total_usages.to_string())
                    } else {
                        ("  └─".to_string(), String::new())
                    };
                    vec![
                        name,
                        format!("@{}", version.version),
                        version.count.to_string(),
                        total,
                    ]
                })
                .collect();
            table.push_group(rows);
        }
        output.push_str(&table.render());
        output.push_str(&skipped_table(&report.skipped));
        output.push('\n');
        output
    }

    fn format_detailed(&self, report: &DetailedReport) -> String {
        let summary = &report.summary;
        let mut output = banner("COMPREHENSIVE ACTION RESULTS");
        output.push_str(&format!("  Organization: {}\n", report.organization));
        output.push_str(&format!("  Scan Time: {}\n", report.scan_timestamp));
        output.push_str(&format!(
            "  Total Repositories: {}\n",
            summary.total_repositories
        ));
        output.push_str(&format!(
            "  Repositories with Workflows: {}\n",
            summary.repositories_with_workflows
        ));
        output.push_str(&format!("  Total Workflows: {}\n", summary.total_workflows));
        output.push_str(&format!("  Unique Actions: {}\n", summary.unique_actions));
        output.push_str(&format!(
            "  Total Action Usages: {}\n",
            summary.total_action_usages
        ));
        output.push_str(&format!(
            "  Actions with Multiple Versions: {}\n",
            summary.actions_with_multiple_versions
        ));
        if let Some(most_used) = &summary.most_used_action {
            output.push_str(&format!(
                "  Most Used Action: {} ({} usages, {} repos, {} workflows)\n",
                most_used.name,
                most_used.total_usages,
                most_used.repositories_using,
                most_used.workflows_using
            ));
        }
        output.push_str(&closing_rule());

        if report.action_rows() == 0 {
            output.push_str(&empty_box("No repositories with workflows found"));
            output.push_str(&skipped_table(&report.skipped));
            return output;
        }

        let mut table = Table::new(&[
            ("REPOSITORY", 19),
            ("WORKFLOW", 32),
            ("ACTION", 28),
            ("VERSION", 9),
            ("COUNT", 7),
            ("TOTAL", 5),
        ]);
        for repo in &report.repositories {
            for (w, workflow) in repo.workflows.iter().enumerate() {
                let rows = workflow
                    .actions
                    .iter()
                    .enumerate()
                    .map(|(a, action)| {
                        let first = a == 0;
                        vec![
                            if first && w == 0 {
                                repo.name.clone()
                            } else {
                                String::new()
                            },
                            if first {
                                workflow.path.clone()
                            } else {
                                String::new()
                            },
                            action.name.clone(),
                            format!("@{}", action.version),
                            action.count.to_string(),
                            if first {
                                workflow.total_action_count.to_string()
                            } else {
                                String::new()
                            },
                        ]
                    })
                    .collect();
                table.push_group(rows);
            }
        }
        output.push_str(&table.render());
        output.push_str(&format!(
            "\nSummary: {} repositories, {} workflows, {} unique actions, {} total usages\n",
            summary.repositories_with_workflows,
            summary.total_workflows,
            summary.unique_actions,
            summary.total_action_usages
        ));
        output.push_str(&skipped_table(&report.skipped));
        output.push('\n');
        output
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TableOutput {
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
