//! Butterfly record representations and the converter between them

pub mod convert;
mod types;

pub use convert::{to_external, to_internal, to_internal_patch, ExternalRecord, InternalRecord};
pub use types::{ButterflyRow, Coordinates};

impl ButterflyRow {
    /// The row in the API (camelCase) representation
    pub fn to_external(&self) -> serde_json::Result<ExternalRecord> {
        let internal: InternalRecord = serde_json::from_value(serde_json::to_value(self)?)?;
        Ok(to_external(&internal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_to_external_uses_api_keys() {
        let row: ButterflyRow = serde_json::from_value(json!({
            "id": 3,
            "common_name": "Monarch",
            "scientific_name": "Danaus plexippus",
            "family": "Nymphalidae",
            "region": "North America",
            "wingspan": 10,
            "createdAt": "2024-03-01T12:00:00Z",
            "updatedAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        let external = row.to_external().unwrap();
        assert_eq!(external["id"], 3);
        assert_eq!(external["scientificName"], "Danaus plexippus");
        assert_eq!(external["wingspan"], json!(10));
        assert_eq!(external["hostPlants"], json!([]));
        assert!(external.get("scientific_name").is_none());
        assert!(external["createdAt"].is_string());
    }
}
