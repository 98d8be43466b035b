//! butterfly-catalog - a validated CRUD REST service for butterfly species records
//!
//! Layers, leaf first: `validation` (rule table and record validator),
//! `record` (row type and camelCase/snake_case converter), `repository`
//! (persistence seam), `rest_api` (service and axum handlers), `http_server`
//! (config and serving), `cli`.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod record;
pub mod repository;
pub mod rest_api;
pub mod validation;
