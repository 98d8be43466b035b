//! CLI command implementations

use std::path::Path;

use serde::Serialize;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability::init_logging;
use crate::validation::{FieldError, Mode, RecordValidator};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_payload, write_json};

/// Output of the `validate` command
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub success: bool,
    pub errors: Vec<FieldError>,
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, host, port } => {
            let config = load_config(config.as_deref(), host, port)?;
            serve(config)
        }
        Command::Validate { mode, input } => validate(mode.into(), input.as_deref()),
    }
}

/// Load the config file (defaults when no path is given) and apply overrides
pub fn load_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> CliResult<HttpServerConfig> {
    let mut config = match path {
        Some(path) => HttpServerConfig::from_file(path)?,
        None => HttpServerConfig::default(),
    };
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    Ok(config)
}

/// Start the HTTP server and block until it stops
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    init_logging(&config.log_level, config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        cors_origins = config.cors_origins.len(),
        "starting butterfly catalog"
    );

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("cannot start runtime: {}", e)))?;
    runtime
        .block_on(HttpServer::new(config).start())
        .map_err(|e| CliError::serve_failed(e.to_string()))
}

/// Run the record validator over one payload
pub fn validate_payload(payload: &serde_json::Value, mode: Mode) -> ValidationReport {
    let errors = RecordValidator::new().validate(payload, mode);
    ValidationReport {
        success: errors.is_empty(),
        errors,
    }
}

/// `validate` command: print the report, fail when the payload is invalid
pub fn validate(mode: Mode, input: Option<&Path>) -> CliResult<()> {
    let payload = read_payload(input)?;
    let report = validate_payload(&payload, mode);
    write_json(&report)?;

    if report.success {
        Ok(())
    } else {
        Err(CliError::invalid_payload(report.errors.len()))
    }
}
