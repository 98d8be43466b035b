//! JSON I/O handling for CLI
//!
//! - Input: one JSON document from a file or stdin
//! - Output: one JSON object per line on stdout

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Parse a JSON document from text
pub fn parse_payload(raw: &str) -> CliResult<Value> {
    if raw.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }
    Ok(serde_json::from_str(raw)?)
}

/// Read a JSON payload from `path`, or from stdin when `None`
pub fn read_payload(path: Option<&Path>) -> CliResult<Value> {
    let raw = match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| CliError::io_error(format!("{}: {}", path.display(), e)))?,
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            buf
        }
    };
    parse_payload(&raw)
}

/// Write a serializable value as one JSON line to stdout
pub fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, value)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}
