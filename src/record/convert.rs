//! Format converter between the API and storage representations
//!
//! External records use camelCase keys (the API contract), internal records
//! use snake_case keys (the relational schema). `id`, `createdAt` and
//! `updatedAt` pass through unchanged in both directions. Keys outside the
//! field map are dropped.

use serde_json::{Map, Value};

/// API-facing record
pub type ExternalRecord = Map<String, Value>;

/// Storage-facing record
pub type InternalRecord = Map<String, Value>;

/// `(external, internal)` key pairs
pub const FIELD_MAP: &[(&str, &str)] = &[
    ("commonName", "common_name"),
    ("scientificName", "scientific_name"),
    ("family", "family"),
    ("region", "region"),
    ("specificLocation", "specific_location"),
    ("habitat", "habitat"),
    ("wingspan", "wingspan"),
    ("wingspanUnit", "wingspan_unit"),
    ("description", "description"),
    ("conservationStatus", "conservation_status"),
    ("threatLevel", "threat_level"),
    ("population", "population"),
    ("flightSeason", "flight_season"),
    ("hostPlants", "host_plants"),
    ("nectarSources", "nectar_sources"),
    ("behavior", "behavior"),
    ("coordinates", "coordinates"),
    ("colorPrimary", "color_primary"),
    ("tags", "tags"),
    ("publicId", "public_id"),
];

/// Identity and audit keys, identical in both representations
pub const PASSTHROUGH_FIELDS: &[&str] = &["id", "createdAt", "updatedAt"];

/// Internal list columns defaulted to `[]` on insert
pub const ARRAY_FIELDS: &[&str] = &["flight_season", "host_plants", "nectar_sources", "tags"];

fn rename(
    source: &Map<String, Value>,
    pairs: impl Iterator<Item = (&'static str, &'static str)>,
) -> Map<String, Value> {
    let mut out = Map::new();
    for key in PASSTHROUGH_FIELDS {
        if let Some(v) = source.get(*key) {
            out.insert((*key).to_string(), v.clone());
        }
    }
    for (from, to) in pairs {
        if let Some(v) = source.get(from) {
            out.insert(to.to_string(), v.clone());
        }
    }
    out
}

/// External to internal, defaulting list columns to `[]` when absent
pub fn to_internal(external: &ExternalRecord) -> InternalRecord {
    let mut internal = to_internal_patch(external);
    for field in ARRAY_FIELDS {
        internal
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
    }
    internal
}

/// External to internal without defaults, for partial updates
pub fn to_internal_patch(external: &ExternalRecord) -> InternalRecord {
    rename(external, FIELD_MAP.iter().copied())
}

/// Internal to external
pub fn to_external(internal: &InternalRecord) -> ExternalRecord {
    rename(internal, FIELD_MAP.iter().map(|&(ext, int)| (int, ext)))
}
