// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and database-backed readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Health check routes for service monitoring
//!
//! `/health` reports process liveness; `/ready` additionally verifies the
//! database connection, so load balancers only route traffic once storage
//! is reachable.

use crate::server::ServerResources;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::health_handler))
            .route("/ready", get(Self::ready_handler))
            .with_state(resources)
    }

    async fn health_handler() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn ready_handler(
        State(resources): State<Arc<ServerResources>>,
    ) -> (StatusCode, Json<serde_json::Value>) {
        let database_ok = sqlx::query("SELECT 1")
            .execute(resources.database.pool())
            .await
            .is_ok();

        let status = if database_ok {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };

        (
            status,
            Json(serde_json::json!({
                "status": if database_ok { "ready" } else { "degraded" },
                "database": database_ok,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })),
        )
    }
}
