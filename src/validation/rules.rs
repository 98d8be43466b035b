//! Field rule evaluator
//!
//! Each check validates one field value against one constraint and returns
//! `None` when the value is acceptable or `Some(message)` otherwise. The checks
//! never panic and never look at any other field.
//!
//! Absence: a missing key and an explicit JSON `null` are both "absent".
//! Whitespace-only strings are also absent for required-field purposes.

use regex::Regex;
use serde_json::Value;

/// One end of a numeric range
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    fn allows_as_lower(&self, v: f64) -> bool {
        match *self {
            Bound::Inclusive(b) => v >= b,
            Bound::Exclusive(b) => v > b,
        }
    }

    fn allows_as_upper(&self, v: f64) -> bool {
        match *self {
            Bound::Inclusive(b) => v <= b,
            Bound::Exclusive(b) => v < b,
        }
    }
}

/// Inclusive `(min, max)` pair used for coordinate components
pub type Range = (f64, f64);

/// A constraint attached to one field in the rule table
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Present, non-blank string with a trimmed length in `[min, max]`
    RequiredText { min: usize, max: usize },
    /// String of at most `max` trimmed characters, when present
    OptionalText { max: usize },
    /// Finite number (or numeric string) within the bounds, when present
    NumericRange { min: Bound, max: Bound },
    /// Exact, case-sensitive member of `allowed`
    Enum {
        allowed: &'static [&'static str],
        required: bool,
    },
    /// String fully matching the regex returned by `regex`
    Pattern {
        regex: fn() -> &'static Regex,
        expected: &'static str,
    },
    /// `{latitude, longitude}` object with both components in range
    BoundedPair { latitude: Range, longitude: Range },
    /// Array of strings, optionally restricted to `allowed`
    StringList {
        allowed: Option<&'static [&'static str]>,
    },
}

impl Rule {
    /// Whether a missing value is itself an error
    pub fn is_required(&self) -> bool {
        match self {
            Rule::RequiredText { .. } => true,
            Rule::Enum { required, .. } => *required,
            _ => false,
        }
    }

    /// Evaluates this rule against a (possibly absent) value
    pub fn evaluate(&self, value: Option<&Value>, label: &str) -> Option<String> {
        match *self {
            Rule::RequiredText { min, max } => required_text(value, label, min, max),
            Rule::OptionalText { max } => optional_text(value, label, max),
            Rule::NumericRange { min, max } => numeric_range(value, label, min, max),
            Rule::Enum { allowed, required } => {
                if required && is_blank(value) {
                    return Some(format!("{} is required", label));
                }
                enum_membership(value, label, allowed)
            }
            Rule::Pattern { regex, expected } => pattern_match(value, label, regex(), expected),
            Rule::BoundedPair {
                latitude,
                longitude,
            } => bounded_pair(value, label, latitude, longitude),
            Rule::StringList { allowed } => string_list(value, label, allowed),
        }
    }
}

/// Returns the value unless it is missing or `null`
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Missing, `null`, or a whitespace-only string
fn is_blank(value: Option<&Value>) -> bool {
    match present(value) {
        None => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Parses a JSON number or numeric string into a finite `f64`.
///
/// `NaN` and infinities are rejected even when spelled as strings.
pub fn parse_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn check_length(text: &str, label: &str, min: usize, max: usize) -> Option<String> {
    let len = text.trim().chars().count();
    if len < min {
        return Some(format!("{} must be at least {} characters", label, min));
    }
    if len > max {
        return Some(format!("{} must be at most {} characters", label, max));
    }
    None
}

/// Required string with trimmed length in `[min_len, max_len]`
pub fn required_text(
    value: Option<&Value>,
    label: &str,
    min_len: usize,
    max_len: usize,
) -> Option<String> {
    if is_blank(value) {
        return Some(format!("{} is required", label));
    }
    match present(value) {
        Some(Value::String(s)) => check_length(s, label, min_len, max_len),
        _ => Some(format!("{} must be a string", label)),
    }
}

/// Optional string of at most `max_len` trimmed characters
pub fn optional_text(value: Option<&Value>, label: &str, max_len: usize) -> Option<String> {
    match present(value) {
        None => None,
        Some(Value::String(s)) => check_length(s, label, 0, max_len),
        Some(_) => Some(format!("{} must be a string", label)),
    }
}

/// Finite number within `[min, max]` (each bound inclusive or exclusive)
pub fn numeric_range(value: Option<&Value>, label: &str, min: Bound, max: Bound) -> Option<String> {
    let value = present(value)?;
    let Some(n) = parse_number(value) else {
        return Some(format!("{} must be a number", label));
    };

    if !min.allows_as_lower(n) {
        return Some(match min {
            Bound::Inclusive(b) => format!("{} must be at least {}", label, b),
            Bound::Exclusive(b) => format!("{} must be greater than {}", label, b),
        });
    }
    if !max.allows_as_upper(n) {
        return Some(match max {
            Bound::Inclusive(b) => format!("{} must be at most {}", label, b),
            Bound::Exclusive(b) => format!("{} must be less than {}", label, b),
        });
    }
    None
}

/// Exact, case-sensitive membership in `allowed`
pub fn enum_membership(value: Option<&Value>, label: &str, allowed: &[&str]) -> Option<String> {
    let value = present(value)?;
    match value.as_str() {
        Some(s) if allowed.contains(&s) => None,
        _ => Some(format!("{} must be one of: {}", label, allowed.join(", "))),
    }
}

/// Full match of `regex`. The regex is expected to be anchored.
pub fn pattern_match(
    value: Option<&Value>,
    label: &str,
    regex: &Regex,
    expected: &str,
) -> Option<String> {
    let value = present(value)?;
    match value.as_str() {
        Some(s) if regex.is_match(s) => None,
        _ => Some(format!("{} must be {}", label, expected)),
    }
}

/// `{latitude, longitude}` with each component inside its inclusive range
pub fn bounded_pair(
    value: Option<&Value>,
    label: &str,
    latitude: Range,
    longitude: Range,
) -> Option<String> {
    let value = present(value)?;
    let Some(obj) = value.as_object() else {
        return Some(format!(
            "{} must be an object with latitude and longitude",
            label
        ));
    };

    for (component, (lo, hi)) in [("latitude", latitude), ("longitude", longitude)] {
        let Some(n) = obj.get(component).and_then(parse_number) else {
            return Some(format!("{} {} must be a number", label, component));
        };
        if n < lo || n > hi {
            return Some(format!(
                "{} {} must be between {} and {}",
                label, component, lo, hi
            ));
        }
    }
    None
}

/// Array of strings, each one in `allowed` when a set is given
pub fn string_list(
    value: Option<&Value>,
    label: &str,
    allowed: Option<&[&str]>,
) -> Option<String> {
    let value = present(value)?;
    let Some(items) = value.as_array() else {
        return Some(format!("{} must be an array of strings", label));
    };

    for item in items {
        let Some(s) = item.as_str() else {
            return Some(format!("{} must be an array of strings", label));
        };
        if let Some(allowed) = allowed {
            if !allowed.contains(&s) {
                return Some(format!(
                    "{} contains invalid value '{}' (allowed: {})",
                    label,
                    s,
                    allowed.join(", ")
                ));
            }
        }
    }
    None
}
