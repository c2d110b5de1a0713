//! CLI module for dwall.

mod commands;

use clap::Parser;
pub use commands::Cli;

use crate::error::DwallError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), DwallError> {
    let cli = Cli::parse();
    cli.execute()
}
