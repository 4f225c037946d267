//! # CLI Module
//!
//! This module defines the command-line interface for ActionLens using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `scan` | Inventory workflows and action usage of an organization |
//! | `init` | Write a configuration file with default values |
//!
//! ## Submodules
//!
//! - [`commands`] - Command implementations
//! - [`exit_codes`] - Standardized exit codes
//! - [`output`] - Report renderers (default, JSON, table, CSV)
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)
//! - `-c, --config <FILE>` - Path to configuration file
//!
//! ## Examples
//!
//! ```bash
//! # Scan workflows and actions of an organization
//! actionlens scan --org myorg
//!
//! # Workflow files only
//! actionlens scan --org myorg --scan workflows
//!
//! # Detailed breakdown as JSON, written to a file
//! actionlens scan --org myorg --detailed --format json --output report.json
//!
//! # Scan a local checkout of every repository
//! actionlens scan --local ./checkouts --format table
//! ```

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{GenerateManArgs, InitArgs, ScanArgs};

/// ActionLens - Explore the GitHub Actions used across an organization's workflows
#[derive(Parser, Debug)]
#[command(name = "actionlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan an organization's workflows and the actions they reference
    Scan(ScanArgs),

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Generate man page (hidden, for packaging)
    #[command(hide = true)]
    GenerateMan(GenerateManArgs),
}
