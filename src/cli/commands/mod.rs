//! CLI commands module

pub mod generate_man;
pub mod init;
pub mod scan;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::scanner::ScanScope;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Organization name to target
    #[arg(short, long, value_name = "ORG", env = "ACTIONLENS_ORG")]
    pub org: Option<String>,

    /// Scan scope
    #[arg(short, long, value_enum, default_value_t = ScanScope::All)]
    pub scan: ScanScope,

    /// Detailed analysis with a repository → workflow → action breakdown
    /// (applies to the `actions` and `all` scopes)
    #[arg(short, long)]
    pub detailed: bool,

    /// Output format (defaults to `[output] format` from the config file)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Scan a local directory whose subdirectories are repositories instead of GitHub
    #[arg(long, value_name = "DIR")]
    pub local: Option<PathBuf>,

    /// Number of workflow files fetched concurrently
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Skip interactive prompts
    #[arg(long)]
    pub non_interactive: bool,
}

/// Arguments for the generate-man command
#[derive(Args, Debug)]
pub struct GenerateManArgs {
    /// Output directory for the man page
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

/// Output format for the scan command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text with colors
    Default,
    Json,
    /// Box-drawing tables
    Table,
    Csv,
}

impl OutputFormat {
    /// Parse a format name as written in the config file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}
