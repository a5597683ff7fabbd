// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, router, and request-driving helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
#![allow(dead_code)]

//! Shared test utilities for `exercise_tracker`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use anyhow::Result;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, Response, StatusCode},
    Router,
};
use exercise_tracker::{
    config::environment::{
        CorsConfig, DatabaseConfig, DatabaseUrl, Environment, LogLevel, ServerConfig,
    },
    database::Database,
    server::{ExerciseTrackerServer, ServerResources},
};
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN, // Default to WARN for quiet tests
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test configuration: in-memory database, wildcard CORS
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        log_level: LogLevel::Info,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        cors: CorsConfig {
            allowed_origins: "*".to_owned(),
        },
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Database::new("sqlite::memory:").await
}

/// Build the full application router backed by an in-memory database
pub async fn create_test_app() -> Result<Router> {
    let database = create_test_database().await?;
    let resources = Arc::new(ServerResources::new(database, test_config()));
    Ok(ExerciseTrackerServer::router(resources))
}

/// Drive the router with a form-encoded POST
pub async fn post_form(app: &Router, uri: &str, form: &[(&str, &str)]) -> Response<Body> {
    let body = serde_urlencoded::to_string(form).expect("form encoding");
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .expect("request"),
        )
        .await
        .expect("response")
}

/// Drive the router with a GET request
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response")
}

/// Collect a response body as JSON
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

/// Register a user and return the generated id
pub async fn register_user(app: &Router, username: &str) -> String {
    let response = post_form(app, "/api/exercise/new-user", &[("username", username)]).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    json["id"].as_str().expect("id field").to_owned()
}

/// Add an exercise entry for a user
pub async fn add_exercise(
    app: &Router,
    user_id: &str,
    description: &str,
    duration: &str,
    date: Option<&str>,
) -> Response<Body> {
    let mut form = vec![
        ("userId", user_id),
        ("description", description),
        ("duration", duration),
    ];
    if let Some(date) = date {
        form.push(("date", date));
    }
    post_form(app, "/api/exercise/add", &form).await
}
