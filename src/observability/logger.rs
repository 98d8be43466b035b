//! Structured logging setup
//!
//! Events are emitted with `tracing` macros across the crate; this module
//! installs the `tracing-subscriber` formatter that prints them.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single line per event
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Builds the filter: `RUST_LOG` when set, otherwise `default_level`.
///
/// An unparsable `default_level` falls back to `info`.
pub fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.
///
/// Returns `false` when a subscriber was already installed (tests, or a
/// second call); the existing one stays active.
pub fn init_logging(default_level: &str, format: LogFormat) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(true);

    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.is_ok()
}
