//! CLI argument definitions using clap
//!
//! Commands:
//! - butterfly-catalog serve [--config <path>] [--host <h>] [--port <p>]
//! - butterfly-catalog validate [--mode create|update] [<file>]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::validation::Mode;

/// Butterfly catalog - a validated CRUD REST service for butterfly species
#[derive(Parser, Debug)]
#[command(name = "butterfly-catalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a butterfly payload and exit
    Validate {
        /// Validation profile
        #[arg(long, value_enum, default_value_t = ValidateMode::Create)]
        mode: ValidateMode,

        /// JSON file to read; stdin when omitted
        input: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ValidateMode {
    Create,
    Update,
}

impl From<ValidateMode> for Mode {
    fn from(mode: ValidateMode) -> Self {
        match mode {
            ValidateMode::Create => Mode::Create,
            ValidateMode::Update => Mode::Update,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
