//! The butterfly rule table
//!
//! One ordered entry per external field. The order is the evaluation order
//! and therefore the order of reported errors: identity, taxonomy, location,
//! physical, conservation, ecological, appearance/media.

use std::sync::OnceLock;

use regex::Regex;

use super::rules::{Bound, Rule};

/// Regions a record may be catalogued under
pub const REGIONS: &[&str] = &[
    "Africa",
    "Asia",
    "Europe",
    "North America",
    "Central America",
    "South America",
    "Caribbean",
    "Oceania",
];

pub const WINGSPAN_UNITS: &[&str] = &["cm", "mm", "in"];

pub const CONSERVATION_STATUSES: &[&str] =
    &["stable", "declining", "endangered", "critical", "extinct"];

pub const THREAT_LEVELS: &[&str] = &["Low", "Medium", "High", "Critical"];

pub const MONTHS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const HEX_COLOR: &str = r"^#[0-9A-Fa-f]{6}$";

/// `#RRGGBB`
pub fn hex_color() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(HEX_COLOR).expect("hex color pattern is valid"))
}

/// A field name, its human label and the rule it must satisfy
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// External (camelCase) key
    pub field: &'static str,
    /// Name used in error messages
    pub label: &'static str,
    pub rule: Rule,
}

const fn spec(field: &'static str, label: &'static str, rule: Rule) -> FieldSpec {
    FieldSpec { field, label, rule }
}

pub static BUTTERFLY_RULES: &[FieldSpec] = &[
    // identity
    spec("commonName", "common name", Rule::RequiredText { min: 2, max: 100 }),
    spec(
        "scientificName",
        "scientific name",
        Rule::RequiredText { min: 2, max: 150 },
    ),
    // taxonomy
    spec("family", "family", Rule::RequiredText { min: 2, max: 50 }),
    // location
    spec(
        "region",
        "region",
        Rule::Enum {
            allowed: REGIONS,
            required: true,
        },
    ),
    spec(
        "specificLocation",
        "specific location",
        Rule::OptionalText { max: 200 },
    ),
    spec("habitat", "habitat", Rule::OptionalText { max: 255 }),
    spec(
        "coordinates",
        "coordinates",
        Rule::BoundedPair {
            latitude: (-90.0, 90.0),
            longitude: (-180.0, 180.0),
        },
    ),
    // physical
    spec(
        "wingspan",
        "wingspan",
        Rule::NumericRange {
            min: Bound::Exclusive(0.0),
            max: Bound::Inclusive(999.0),
        },
    ),
    spec(
        "wingspanUnit",
        "wingspan unit",
        Rule::Enum {
            allowed: WINGSPAN_UNITS,
            required: false,
        },
    ),
    spec("description", "description", Rule::OptionalText { max: 5000 }),
    // conservation
    spec(
        "conservationStatus",
        "conservation status",
        Rule::Enum {
            allowed: CONSERVATION_STATUSES,
            required: false,
        },
    ),
    spec(
        "threatLevel",
        "threat level",
        Rule::Enum {
            allowed: THREAT_LEVELS,
            required: false,
        },
    ),
    spec("population", "population", Rule::OptionalText { max: 100 }),
    // ecological
    spec(
        "flightSeason",
        "flight season",
        Rule::StringList {
            allowed: Some(MONTHS),
        },
    ),
    spec("hostPlants", "host plants", Rule::StringList { allowed: None }),
    spec(
        "nectarSources",
        "nectar sources",
        Rule::StringList { allowed: None },
    ),
    spec("behavior", "behavior", Rule::OptionalText { max: 5000 }),
    // appearance / media
    spec(
        "colorPrimary",
        "primary color",
        Rule::Pattern {
            regex: hex_color,
            expected: "a hex color code (#RRGGBB)",
        },
    ),
    spec("tags", "tags", Rule::StringList { allowed: None }),
    spec("publicId", "public image id", Rule::OptionalText { max: 255 }),
];
