//! # HTTP Server Module
//!
//! Wraps the butterfly REST API in a runnable axum server.
//!
//! # Endpoints
//!
//! - `/` - Greeting
//! - `/health` - Health check
//! - `/butterflies/*` - Butterfly CRUD

pub mod config;
pub mod health_routes;
pub mod server;

pub use config::{ConfigError, HttpServerConfig};
pub use server::{build_router, HttpServer};
