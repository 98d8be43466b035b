//! In-memory repository
//!
//! Rows live in a `BTreeMap` keyed by id behind a `RwLock`. The uniqueness
//! check and the write happen under the same write guard.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde_json::Value;

use super::{ButterflyRepository, RepositoryError, RepositoryResult};
use crate::record::{ButterflyRow, InternalRecord};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, ButterflyRow>,
    last_id: i64,
}

impl Table {
    fn ensure_unique(&self, scientific_name: &str, except: Option<i64>) -> RepositoryResult<()> {
        let taken = self
            .rows
            .values()
            .any(|r| r.scientific_name == scientific_name && Some(r.id) != except);
        if taken {
            return Err(RepositoryError::DuplicateScientificName(
                scientific_name.to_string(),
            ));
        }
        Ok(())
    }
}

/// Repository backed by process memory
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    table: RwLock<Table>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub fn len(&self) -> RepositoryResult<usize> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> RepositoryResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, Table>> {
        self.table
            .read()
            .map_err(|_| RepositoryError::Internal("table lock poisoned".into()))
    }

    fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, Table>> {
        self.table
            .write()
            .map_err(|_| RepositoryError::Internal("table lock poisoned".into()))
    }

    fn filtered(
        &self,
        pred: impl Fn(&ButterflyRow) -> bool,
    ) -> RepositoryResult<Vec<ButterflyRow>> {
        Ok(self.read()?.rows.values().filter(|&r| pred(r)).cloned().collect())
    }
}

fn timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339())
}

fn decode(record: InternalRecord) -> RepositoryResult<ButterflyRow> {
    serde_json::from_value(Value::Object(record))
        .map_err(|e| RepositoryError::Internal(format!("malformed row: {}", e)))
}

impl ButterflyRepository for InMemoryRepository {
    fn list(&self) -> RepositoryResult<Vec<ButterflyRow>> {
        self.filtered(|_| true)
    }

    fn list_by_region(&self, region: &str) -> RepositoryResult<Vec<ButterflyRow>> {
        self.filtered(|r| r.region.eq_ignore_ascii_case(region))
    }

    fn list_by_family(&self, family: &str) -> RepositoryResult<Vec<ButterflyRow>> {
        self.filtered(|r| r.family.eq_ignore_ascii_case(family))
    }

    fn get(&self, id: i64) -> RepositoryResult<ButterflyRow> {
        self.read()?
            .rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn create(&self, mut record: InternalRecord) -> RepositoryResult<ButterflyRow> {
        let mut table = self.write()?;
        let id = table.last_id + 1;
        let now = timestamp();

        record.insert("id".into(), Value::from(id));
        record.insert("createdAt".into(), now.clone());
        record.insert("updatedAt".into(), now);

        let row = decode(record)?;
        table.ensure_unique(&row.scientific_name, None)?;

        table.last_id = id;
        table.rows.insert(id, row.clone());
        tracing::debug!(id, scientific_name = %row.scientific_name, "butterfly row inserted");
        Ok(row)
    }

    fn update(&self, id: i64, patch: InternalRecord) -> RepositoryResult<ButterflyRow> {
        let mut table = self.write()?;
        let existing = table.rows.get(&id).ok_or(RepositoryError::NotFound(id))?;

        let Value::Object(mut merged) = serde_json::to_value(existing)
            .map_err(|e| RepositoryError::Internal(format!("encode row: {}", e)))?
        else {
            return Err(RepositoryError::Internal("row did not encode as an object".into()));
        };

        for (key, value) in patch {
            if matches!(key.as_str(), "id" | "createdAt" | "updatedAt") {
                continue;
            }
            merged.insert(key, value);
        }
        merged.insert("updatedAt".into(), timestamp());

        let row = decode(merged)?;
        table.ensure_unique(&row.scientific_name, Some(id))?;

        table.rows.insert(id, row.clone());
        tracing::debug!(id, "butterfly row updated");
        Ok(row)
    }

    fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut table = self.write()?;
        table
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}
