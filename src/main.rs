//! ActionLens - Explore the GitHub Actions used across an organization's workflows
//!
//! This is the main entry point for the CLI application.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use actionlens::cli::{commands, exit_codes, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    let config_path = cli.config.as_deref();
    let exit_code = match cli.command {
        Commands::Scan(args) => commands::scan::execute(args, config_path)
            .await
            .unwrap_or_else(|e| report_error(&e, exit_codes::for_error(&e))),
        Commands::Init(args) => commands::init::execute(args, config_path)
            .await
            .unwrap_or_else(|e| report_error(&e, exit_codes::ERROR)),
        Commands::GenerateMan(args) => commands::generate_man::execute(args)
            .await
            .unwrap_or_else(|e| report_error(&e, exit_codes::for_error(&e))),
    };

    std::process::exit(exit_code);
}

fn report_error(error: &dyn std::fmt::Display, code: i32) -> i32 {
    eprintln!("{} {}", "Error:".red().bold(), error);
    code
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}
