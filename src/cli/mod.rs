//! CLI module for the butterfly catalog
//!
//! Provides command-line interface for:
//! - serve: load config, start logging, run the HTTP server
//! - validate: check one payload against the record rules

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, ValidateMode};
pub use commands::{load_config, run_command, serve, validate, validate_payload, ValidationReport};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_payload, read_payload, write_json};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
