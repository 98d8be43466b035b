//! Record validator
//!
//! Runs the rule table against a whole payload and collects every failure.
//! Validation never stops at the first error so a client can fix all of its
//! fields in one round trip.

use serde_json::{Map, Number, Value};

use super::errors::FieldError;
use super::rules::{parse_number, Rule};
use super::table::{FieldSpec, BUTTERFLY_RULES};

/// Which validation profile to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every required field is checked, optional fields when present
    Create,
    /// Only keys present in the payload are checked
    Update,
}

/// Applies an ordered rule table to record payloads.
///
/// The validator is stateless and does not mutate the payload it checks.
#[derive(Debug, Clone, Copy)]
pub struct RecordValidator {
    rules: &'static [FieldSpec],
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordValidator {
    /// Validator for butterfly records
    pub fn new() -> Self {
        Self {
            rules: BUTTERFLY_RULES,
        }
    }

    /// Validates a payload, returning errors in rule-table order.
    ///
    /// An empty vector means the payload is valid.
    pub fn validate(&self, payload: &Value, mode: Mode) -> Vec<FieldError> {
        match payload.as_object() {
            Some(obj) => self.validate_fields(obj, mode),
            None => vec![FieldError::not_an_object()],
        }
    }

    /// Validates the fields of a payload object
    pub fn validate_fields(&self, obj: &Map<String, Value>, mode: Mode) -> Vec<FieldError> {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter(|spec| mode == Mode::Create || obj.contains_key(spec.field))
            .filter_map(|spec| {
                spec.rule
                    .evaluate(obj.get(spec.field), spec.label)
                    .map(|message| FieldError::new(spec.field, message))
            })
            .collect();

        if !errors.is_empty() {
            tracing::debug!(
                ?mode,
                error_count = errors.len(),
                fields = ?errors.iter().map(|e| e.field.as_str()).collect::<Vec<_>>(),
                "record payload rejected"
            );
        }

        errors
    }

    /// `validate` as a `Result`
    pub fn check(&self, payload: &Value, mode: Mode) -> Result<(), Vec<FieldError>> {
        let errors = self.validate(payload, mode);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Canonicalizes an already validated payload in place.
    ///
    /// Text fields are trimmed and numeric strings become JSON numbers.
    /// Keys the rule table does not know are left untouched.
    pub fn normalize(&self, payload: &mut Map<String, Value>) {
        for spec in self.rules {
            let Some(value) = payload.get_mut(spec.field) else {
                continue;
            };
            match spec.rule {
                Rule::RequiredText { .. } | Rule::OptionalText { .. } => trim_in_place(value),
                Rule::NumericRange { .. } => number_in_place(value),
                Rule::BoundedPair { .. } => {
                    if let Some(obj) = value.as_object_mut() {
                        for component in ["latitude", "longitude"] {
                            if let Some(v) = obj.get_mut(component) {
                                number_in_place(v);
                            }
                        }
                    }
                }
                Rule::Enum { .. } | Rule::Pattern { .. } | Rule::StringList { .. } => {}
            }
        }
    }
}

fn trim_in_place(value: &mut Value) {
    if let Value::String(s) = value {
        let trimmed = s.trim();
        if trimmed.len() != s.len() {
            *s = trimmed.to_string();
        }
    }
}

/// Numeric strings become numbers; integral text stays an integer
fn number_in_place(value: &mut Value) {
    let Some(text) = value.as_str() else {
        return;
    };
    let number = match text.trim().parse::<i64>() {
        Ok(n) => Some(Number::from(n)),
        Err(_) => parse_number(value).and_then(Number::from_f64),
    };
    if let Some(n) = number {
        *value = Value::Number(n);
    }
}
