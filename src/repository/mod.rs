//! # Record Repository
//!
//! Persistence seam for butterfly rows. Handlers receive a repository
//! through axum state; nothing in the crate holds a global handle.

mod memory;

pub use memory::InMemoryRepository;

use thiserror::Error;

use crate::record::{ButterflyRow, InternalRecord};

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No row with this id
    #[error("Butterfly {0} not found")]
    NotFound(i64),

    /// Scientific name uniqueness violated
    #[error("A butterfly with scientific name '{0}' already exists")]
    DuplicateScientificName(String),

    /// Storage failure
    #[error("Repository failure: {0}")]
    Internal(String),
}

/// CRUD operations over butterfly rows.
///
/// Inputs are internal (snake_case) records that have already passed
/// validation. Implementations own id assignment, audit timestamps and the
/// scientific-name uniqueness constraint.
pub trait ButterflyRepository: Send + Sync {
    /// All rows, ordered by id
    fn list(&self) -> RepositoryResult<Vec<ButterflyRow>>;

    /// Rows whose region matches, ignoring ASCII case
    fn list_by_region(&self, region: &str) -> RepositoryResult<Vec<ButterflyRow>>;

    /// Rows whose family matches, ignoring ASCII case
    fn list_by_family(&self, family: &str) -> RepositoryResult<Vec<ButterflyRow>>;

    fn get(&self, id: i64) -> RepositoryResult<ButterflyRow>;

    /// Inserts a new row and returns it with id and timestamps assigned
    fn create(&self, record: InternalRecord) -> RepositoryResult<ButterflyRow>;

    /// Merges `patch` into an existing row. Identity and audit keys in the
    /// patch are ignored.
    fn update(&self, id: i64, patch: InternalRecord) -> RepositoryResult<ButterflyRow>;

    fn delete(&self, id: i64) -> RepositoryResult<()>;
}
