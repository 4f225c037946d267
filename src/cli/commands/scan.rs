//! Scan command - Inventory workflows and action usage across an organization

use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use super::{OutputFormat, ScanArgs};
use crate::cli::exit_codes;
use crate::cli::output::{CsvOutput, JsonOutput, ReportRenderer, TableOutput, TerminalOutput};
use crate::config::Config;
use crate::error::{ActionLensError, OutputError};
use crate::providers::github::GitHubSource;
use crate::providers::local::LocalSource;
use crate::providers::ContentSource;
use crate::scanner::{OrgScanner, ScanRequest};

pub async fn execute(args: ScanArgs, config_path: Option<&Path>) -> Result<i32, ActionLensError> {
    let mut config = Config::load(config_path)?;
    if let Some(concurrency) = args.concurrency {
        config.scan.concurrency = usize::from(concurrency);
    }

    let format = match args.format {
        Some(format) => format,
        None => OutputFormat::from_name(&config.output.format).ok_or_else(|| {
            ActionLensError::InvalidArgument(format!(
                "unknown output format '{}'",
                config.output.format
            ))
        })?,
    };

    let (source, organization): (Arc<dyn ContentSource>, String) = match &args.local {
        Some(dir) => {
            let source = LocalSource::new(dir, &config.scan)?;
            let organization = match non_empty(args.org.as_deref()) {
                Some(org) => org,
                None => directory_name(source.root()).ok_or_else(|| {
                    ActionLensError::InvalidArgument(
                        "cannot derive an organization name from --local; pass --org".to_string(),
                    )
                })?,
            };
            (Arc::new(source), organization)
        }
        None => {
            let organization = non_empty(args.org.as_deref()).ok_or_else(|| {
                ActionLensError::InvalidArgument(
                    "an organization is required (--org <ORG>)".to_string(),
                )
            })?;
            let source = GitHubSource::new(&config.github, &config.scan)?;
            (Arc::new(source), organization)
        }
    };

    tracing::info!(
        organization = %organization,
        scope = ?args.scan,
        detailed = args.detailed,
        "Starting scan"
    );

    let scanner = OrgScanner::new(source, config.scan.concurrency);
    let request = ScanRequest::new(organization, args.scan, args.detailed);
    let outcome = scanner.scan(&request).await?;

    if args.output.is_some() {
        colored::control::set_override(false);
    }

    let renderer: Box<dyn ReportRenderer> = match format {
        OutputFormat::Default => Box::new(TerminalOutput::new()),
        OutputFormat::Json => Box::new(JsonOutput::new()),
        OutputFormat::Table => Box::new(TableOutput::new()),
        OutputFormat::Csv => Box::new(CsvOutput::new()),
    };
    let rendered = renderer.render_report(&outcome.report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered).map_err(|e| {
                ActionLensError::Output(OutputError::FileWrite {
                    path: path.display().to_string(),
                    source: e,
                })
            })?;
            eprintln!(
                "{} Report written to: {}",
                "Success:".green().bold(),
                path.display().to_string().cyan()
            );
        }
        None => print!("{}", rendered),
    }

    let skipped = outcome.report.skipped().len();
    if skipped > 0 {
        eprintln!(
            "{} {} workflow(s) could not be analysed",
            "Warning:".yellow().bold(),
            skipped
        );
        Ok(exit_codes::WARNINGS)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn directory_name(dir: &Path) -> Option<String> {
    let dir = dir.canonicalize().ok()?;
    dir.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
