//! Stored butterfly row
//!
//! Field names are the internal (snake_case) representation. The identity
//! and audit keys keep their external spelling, see `convert`.
//!
//! Numeric columns hold a `serde_json::Number` so a value is read back in
//! the form it was written: `10` stays an integer, `10.5` a float.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Number;

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: Number,
    pub longitude: Number,
}

/// One butterfly catalog entry as held by a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButterflyRow {
    pub id: i64,
    pub common_name: String,
    pub scientific_name: String,
    pub family: String,
    pub region: String,
    pub specific_location: Option<String>,
    pub habitat: Option<String>,
    pub wingspan: Option<Number>,
    pub wingspan_unit: Option<String>,
    pub description: Option<String>,
    pub conservation_status: Option<String>,
    pub threat_level: Option<String>,
    pub population: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub flight_season: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub host_plants: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nectar_sources: Vec<String>,
    pub behavior: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub color_primary: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    pub public_id: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Clearing a list column stores an empty list
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row_json() -> serde_json::Value {
        json!({
            "id": 1,
            "common_name": "Monarch",
            "scientific_name": "Danaus plexippus",
            "family": "Nymphalidae",
            "region": "North America",
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        })
    }

    #[test]
    fn test_optional_columns_default() {
        let row: ButterflyRow = serde_json::from_value(row_json()).unwrap();
        assert_eq!(row.id, 1);
        assert_eq!(row.wingspan, None);
        assert!(row.tags.is_empty());
        assert!(row.coordinates.is_none());
    }

    #[test]
    fn test_null_list_becomes_empty() {
        let mut value = row_json();
        value["host_plants"] = serde_json::Value::Null;
        let row: ButterflyRow = serde_json::from_value(value).unwrap();
        assert!(row.host_plants.is_empty());
    }

    #[test]
    fn test_numbers_keep_their_written_form() {
        let mut value = row_json();
        value["wingspan"] = json!(10);
        value["coordinates"] = json!({"latitude": -90, "longitude": 180.5});

        let row: ButterflyRow = serde_json::from_value(value).unwrap();
        let encoded = serde_json::to_value(&row).unwrap();
        assert_eq!(encoded["wingspan"], json!(10));
        assert_eq!(encoded["coordinates"], json!({"latitude": -90, "longitude": 180.5}));
    }

    #[test]
    fn test_audit_keys_keep_external_spelling() {
        let row: ButterflyRow = serde_json::from_value(row_json()).unwrap();
        let value = serde_json::to_value(&row).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
        assert_eq!(value["common_name"], "Monarch");
    }
}
