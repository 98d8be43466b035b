//! Field-level validation errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field name reported when the payload itself is malformed
pub const ROOT_FIELD: &str = "$root";

/// A single failed field rule.
///
/// `field` is always the external (camelCase) key so callers can map the
/// error straight back onto the payload they sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error for a payload that is not a JSON object
    pub fn not_an_object() -> Self {
        Self::new(ROOT_FIELD, "payload must be a JSON object")
    }
}
