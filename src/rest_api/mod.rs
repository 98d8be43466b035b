//! # Butterfly REST API Module
//!
//! HTTP endpoints for CRUD operations on butterfly records. Handlers hold a
//! `CatalogService`, which validates payloads before they reach the
//! repository.

pub mod errors;
pub mod handler;
pub mod response;
pub mod server;

pub use errors::{ApiError, ApiResult};
pub use handler::CatalogService;
pub use response::Envelope;
pub use server::butterfly_routes;
