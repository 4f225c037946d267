//! Exit codes for the CLI
//!
//! Standard exit codes used by the ActionLens CLI for CI/CD integration.
//!
//! # Exit Code Reference
//!
//! | Code | Constant | Meaning | Example |
//! |------|----------|---------|---------|
//! | 0 | `SUCCESS` | Success | Scan completed, every workflow analysed |
//! | 2 | `WARNINGS` | Partial scan | Some workflow files could not be fetched or parsed |
//! | 3 | `ERROR` | Runtime error | Missing token, unknown organization, network error |
//! | 4 | `INVALID_ARGS` | Invalid arguments | No organization given, unknown output format |

use crate::error::ActionLensError;

/// Scan completed and every discovered workflow was analysed.
pub const SUCCESS: i32 = 0;

/// Scan completed but some workflows were skipped.
///
/// The report is still written; skipped workflows are listed in it.
pub const WARNINGS: i32 = 2;

/// Runtime error (configuration, provider or output failure).
pub const ERROR: i32 = 3;

/// Invalid command-line arguments.
pub const INVALID_ARGS: i32 = 4;

/// Exit code for a failed command
pub fn for_error(error: &ActionLensError) -> i32 {
    match error {
        ActionLensError::InvalidArgument(_) => INVALID_ARGS,
        _ => ERROR,
    }
}
