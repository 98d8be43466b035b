//! # Catalog Service
//!
//! Runs each request through the validation core and the repository:
//! validate → normalize → convert → persist → convert back.

use std::sync::Arc;

use serde_json::Value;

use crate::record::{to_internal, to_internal_patch, ButterflyRow, ExternalRecord};
use crate::repository::ButterflyRepository;
use crate::validation::{FieldError, Mode, RecordValidator};

use super::errors::{ApiError, ApiResult};

/// Request-facing operations over butterfly records
#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn ButterflyRepository>,
    validator: RecordValidator,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ButterflyRepository>) -> Self {
        Self {
            repository,
            validator: RecordValidator::new(),
        }
    }

    pub fn list(&self) -> ApiResult<Vec<ExternalRecord>> {
        externalize_all(self.repository.list()?)
    }

    pub fn list_by_region(&self, region: &str) -> ApiResult<Vec<ExternalRecord>> {
        externalize_all(self.repository.list_by_region(region)?)
    }

    pub fn list_by_family(&self, family: &str) -> ApiResult<Vec<ExternalRecord>> {
        externalize_all(self.repository.list_by_family(family)?)
    }

    pub fn get(&self, id: i64) -> ApiResult<ExternalRecord> {
        externalize(&self.repository.get(id)?)
    }

    /// Validates a full payload and stores it as a new record
    pub fn create(&self, payload: Value) -> ApiResult<ExternalRecord> {
        let mut payload = self.accept(payload, Mode::Create)?;
        // Identity and audit fields are assigned by the repository
        for key in ["id", "createdAt", "updatedAt"] {
            payload.remove(key);
        }

        let row = self.repository.create(to_internal(&payload))?;
        tracing::info!(id = row.id, scientific_name = %row.scientific_name, "butterfly created");
        externalize(&row)
    }

    /// Validates the supplied fields and merges them into record `id`.
    ///
    /// Validation runs before the existence check, so an invalid payload
    /// for a missing id is reported as a validation error.
    pub fn update(&self, id: i64, payload: Value) -> ApiResult<ExternalRecord> {
        let payload = self.accept(payload, Mode::Update)?;

        let row = self.repository.update(id, to_internal_patch(&payload))?;
        tracing::info!(id = row.id, "butterfly updated");
        externalize(&row)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.repository.delete(id)?;
        tracing::info!(id, "butterfly deleted");
        Ok(())
    }

    /// Validation plus normalization; returns the payload object
    fn accept(&self, payload: Value, mode: Mode) -> ApiResult<ExternalRecord> {
        let Value::Object(mut obj) = payload else {
            return Err(ApiError::Validation(vec![FieldError::not_an_object()]));
        };

        let errors = self.validator.validate_fields(&obj, mode);
        if !errors.is_empty() {
            return Err(ApiError::Validation(errors));
        }

        self.validator.normalize(&mut obj);
        Ok(obj)
    }
}

fn externalize(row: &ButterflyRow) -> ApiResult<ExternalRecord> {
    row.to_external()
        .map_err(|e| ApiError::Internal(format!("cannot encode butterfly {}: {}", row.id, e)))
}

fn externalize_all(rows: Vec<ButterflyRow>) -> ApiResult<Vec<ExternalRecord>> {
    rows.iter().map(externalize).collect()
}
