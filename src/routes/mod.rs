// ABOUTME: HTTP route handlers grouped by concern
// ABOUTME: Exercise API endpoints plus health/readiness probes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP routes for the exercise tracker API

/// Exercise tracking endpoints (users, add, log)
pub mod exercise;

/// Health and readiness endpoints
pub mod health;
