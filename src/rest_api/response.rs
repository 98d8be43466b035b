//! # Response Formatting
//!
//! Every butterfly endpoint answers with the same envelope:
//! `{ success, data?, count?, message?, error?, errors? }`.

use serde::Serialize;

use crate::validation::FieldError;

/// Uniform response body
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl<T: Serialize> Envelope<T> {
    /// Successful response carrying `data`
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            count: None,
            message: None,
            error: None,
            errors: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> Envelope<Vec<T>> {
    /// Successful list response; `count` is the number of items
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            count: Some(count),
            ..Self::data(items)
        }
    }
}

impl Envelope<()> {
    /// Successful response without data
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            count: None,
            message: Some(message.into()),
            error: None,
            errors: None,
        }
    }

    /// Failed response
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            count: None,
            message: None,
            error: Some(error.into()),
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }
}
