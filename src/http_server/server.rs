//! # HTTP Server
//!
//! Combines the health and butterfly routers, applies CORS and request
//! tracing, and serves until Ctrl-C.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::repository::{ButterflyRepository, InMemoryRepository};
use crate::rest_api::{butterfly_routes, CatalogService};

use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// HTTP Server for the butterfly catalog
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server backed by an empty in-memory repository
    pub fn new(config: HttpServerConfig) -> Self {
        Self::with_repository(config, Arc::new(InMemoryRepository::new()))
    }

    /// Create a server over the given repository
    pub fn with_repository(
        config: HttpServerConfig,
        repository: Arc<dyn ButterflyRepository>,
    ) -> Self {
        let router = build_router(&config, repository);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "butterfly catalog listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Build the combined router with all endpoints
pub fn build_router(
    config: &HttpServerConfig,
    repository: Arc<dyn ButterflyRepository>,
) -> Router {
    let service = Arc::new(CatalogService::new(repository));

    Router::new()
        .merge(health_routes())
        .nest("/butterflies", butterfly_routes(service))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| match s.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = %s, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
