//! # Butterfly Routes
//!
//! Axum handlers for the `/butterflies` endpoints. Every handler answers
//! with an `Envelope`; errors go through `ApiError::into_response`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::record::ExternalRecord;

use super::errors::{ApiError, ApiResult};
use super::handler::CatalogService;
use super::response::Envelope;

/// Shared state type
type ServiceState = Arc<CatalogService>;

/// Routes relative to the `/butterflies` mount point
pub fn butterfly_routes(service: Arc<CatalogService>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/region/:region", get(list_by_region_handler))
        .route("/family/:family", get(list_by_family_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(service)
}

fn parse_id(id: Result<Path<i64>, PathRejection>) -> ApiResult<i64> {
    id.map(|Path(id)| id)
        .map_err(|rejection| ApiError::InvalidId(rejection.body_text()))
}

fn parse_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

/// List all records
async fn list_handler(
    State(service): State<ServiceState>,
) -> ApiResult<Json<Envelope<Vec<ExternalRecord>>>> {
    Ok(Json(Envelope::list(service.list()?)))
}

async fn list_by_region_handler(
    State(service): State<ServiceState>,
    Path(region): Path<String>,
) -> ApiResult<Json<Envelope<Vec<ExternalRecord>>>> {
    Ok(Json(Envelope::list(service.list_by_region(&region)?)))
}

async fn list_by_family_handler(
    State(service): State<ServiceState>,
    Path(family): Path<String>,
) -> ApiResult<Json<Envelope<Vec<ExternalRecord>>>> {
    Ok(Json(Envelope::list(service.list_by_family(&family)?)))
}

/// Get single record handler
async fn get_handler(
    State(service): State<ServiceState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<ExternalRecord>>> {
    let id = parse_id(id)?;
    Ok(Json(Envelope::data(service.get(id)?)))
}

/// Create record handler
async fn create_handler(
    State(service): State<ServiceState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<ExternalRecord>>)> {
    let payload = parse_body(body)?;
    let created = service.create(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(created).with_message("Butterfly created successfully")),
    ))
}

/// Update record handler
async fn update_handler(
    State(service): State<ServiceState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Envelope<ExternalRecord>>> {
    let id = parse_id(id)?;
    let payload = parse_body(body)?;
    let updated = service.update(id, payload)?;
    Ok(Json(Envelope::data(updated).with_message("Butterfly updated successfully")))
}

/// Delete record handler
async fn delete_handler(
    State(service): State<ServiceState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<()>>> {
    let id = parse_id(id)?;
    service.delete(id)?;
    Ok(Json(Envelope::message("Butterfly deleted successfully")))
}
