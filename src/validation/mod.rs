//! Validation core for butterfly records
//!
//! # Design
//!
//! - One declarative rule table, ordered by field group
//! - One interpreter (`RecordValidator`) shared by create and update
//! - Pure and stateless: no I/O, no locking
//! - Failures are collected, never fail-fast
//!
//! Scientific-name uniqueness needs a cross-record check and is enforced by
//! the repository, not here.

mod errors;
mod rules;
mod table;
mod validator;

pub use errors::{FieldError, ROOT_FIELD};
pub use rules::{
    bounded_pair, enum_membership, numeric_range, optional_text, parse_number, pattern_match,
    required_text, string_list, Bound, Range, Rule,
};
pub use table::{
    hex_color, FieldSpec, BUTTERFLY_RULES, CONSERVATION_STATUSES, MONTHS, REGIONS, THREAT_LEVELS,
    WINGSPAN_UNITS,
};
pub use validator::{Mode, RecordValidator};
