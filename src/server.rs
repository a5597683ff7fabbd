// ABOUTME: Server resources and HTTP server lifecycle management
// ABOUTME: Composes routers and middleware, binds the listener, handles graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP server composition and lifecycle
//!
//! `ServerResources` holds everything handlers share; it is created once at
//! startup and passed into each route tree behind an `Arc`. All state lives
//! in the database, so nothing here is mutable between requests.

use crate::{
    config::environment::ServerConfig,
    database::Database,
    errors::AppError,
    middleware::{setup_cors, MakeExerciseRequestId},
    routes::{exercise::ExerciseRoutes, health::HealthRoutes},
};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

/// Maximum accepted request body size; form submissions here are tiny
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared server resources passed to every route tree
pub struct ServerResources {
    /// Database connection pool, opened once at startup
    pub database: Database,
    /// Loaded server configuration
    pub config: ServerConfig,
}

impl ServerResources {
    /// Create new server resources
    #[must_use]
    pub const fn new(database: Database, config: ServerConfig) -> Self {
        Self { database, config }
    }
}

/// The exercise tracker HTTP server
pub struct ExerciseTrackerServer {
    resources: Arc<ServerResources>,
}

impl ExerciseTrackerServer {
    /// Create a new server around shared resources
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the complete router: API routes, health probes, middleware,
    /// and the catch-all 404 fallback
    #[must_use]
    pub fn router(resources: Arc<ServerResources>) -> Router {
        let request_id_header = http::HeaderName::from_static("x-request-id");

        Router::new()
            .merge(HealthRoutes::routes(resources.clone()))
            .merge(ExerciseRoutes::routes(resources.clone()))
            .fallback(Self::handle_not_found)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(
                        request_id_header.clone(),
                        MakeExerciseRequestId,
                    ))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(request_id_header))
                    .layer(setup_cors(&resources.config))
                    .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
            )
    }

    /// Catch-all for unmatched routes: structured 404 envelope
    async fn handle_not_found() -> AppError {
        AppError::not_found("Route")
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the listener fails to bind or the server loop
    /// fails.
    pub async fn run(self) -> Result<()> {
        let port = self.resources.config.http_port;
        let router = Self::router(self.resources.clone());

        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!("HTTP server listening on http://0.0.0.0:{port}");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        // Explicit lifecycle: the pool opened at startup closes at shutdown
        self.resources.database.close().await;
        info!("Database connection closed, shutdown complete");

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install shutdown signal handler");
        return;
    }
    info!("Shutdown signal received");
}
