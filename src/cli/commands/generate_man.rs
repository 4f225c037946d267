//! Generate man page command

use clap::CommandFactory;
use std::fs;

use super::GenerateManArgs;
use crate::cli::{exit_codes, Cli};
use crate::error::{ActionLensError, OutputError};

/// Execute the generate-man command
pub async fn execute(args: GenerateManArgs) -> Result<i32, ActionLensError> {
    let man = clap_mangen::Man::new(Cli::command());
    let output_path = args.output.join("actionlens.1");

    let mut buffer: Vec<u8> = Vec::new();
    man.render(&mut buffer).map_err(|e| {
        ActionLensError::Output(OutputError::Serialize {
            message: format!("Failed to generate man page: {}", e),
        })
    })?;

    fs::write(&output_path, buffer).map_err(|e| {
        ActionLensError::Output(OutputError::FileWrite {
            path: output_path.display().to_string(),
            source: e,
        })
    })?;

    println!("Man page generated: {}", output_path.display());

    Ok(exit_codes::SUCCESS)
}
