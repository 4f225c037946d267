//! Init command - Write a configuration file with default values

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::Confirm;
use std::fs;
use std::path::Path;

use super::InitArgs;
use crate::cli::exit_codes;
use crate::config::loader::CONFIG_FILENAME;
use crate::config::Config;

pub async fn execute(args: InitArgs, config_path: Option<&Path>) -> Result<i32> {
    let config_path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILENAME));

    if config_path.exists() && !args.force {
        if args.non_interactive {
            eprintln!(
                "{} Configuration file already exists. Use --force to overwrite.",
                "Error:".red().bold()
            );
            return Ok(exit_codes::ERROR);
        }

        let overwrite = Confirm::new()
            .with_prompt("Configuration file already exists. Overwrite?")
            .default(false)
            .interact()?;

        if !overwrite {
            println!("{}", "Aborted.".yellow());
            return Ok(exit_codes::SUCCESS);
        }
    }

    let config_content = Config::default().to_toml()?;
    fs::write(config_path, &config_content).with_context(|| {
        format!(
            "Failed to write configuration file {}",
            config_path.display()
        )
    })?;

    println!(
        "{} Created {}",
        "Success:".green().bold(),
        config_path.display().to_string().cyan()
    );

    println!("\nNext steps:");
    println!(
        "  1. Review {} (token variables, workflow directory, concurrency)",
        config_path.display().to_string().cyan()
    );
    println!(
        "  2. Run {} to scan an organization",
        "actionlens scan --org <ORG>".cyan()
    );

    Ok(exit_codes::SUCCESS)
}
