// ABOUTME: Main library entry point for the exercise tracker API
// ABOUTME: Provides HTTP endpoints for user registration and exercise logging
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # Exercise Tracker API
//!
//! A small HTTP service for tracking exercise: users register a username,
//! log exercises (description, duration, date) against their record, and
//! query their logs with optional date-range and count filters.
//!
//! ## Architecture
//!
//! The server follows a strict handlers → persistence layering:
//! - **Routes**: HTTP endpoint handlers that validate input and shape JSON responses
//! - **Database**: SQLite-backed storage for users and exercise logs
//! - **Errors**: Unified error codes mapped to HTTP statuses with a structured envelope
//! - **Config**: Environment-based configuration with CLI overrides
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use exercise_tracker::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Exercise tracker configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-based configuration management
pub mod config;

/// Database access layer for users and exercise logs
pub mod database;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Production logging and structured output
pub mod logging;

/// HTTP middleware (CORS)
pub mod middleware;

/// Common data models for users and exercise entries
pub mod models;

/// `HTTP` routes for user registration and exercise logging
pub mod routes;

/// Server resources and HTTP server lifecycle
pub mod server;
