// ABOUTME: HTTP middleware for cross-cutting request concerns
// ABOUTME: CORS configuration and request id generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP middleware for the exercise tracker

/// CORS middleware configuration
pub mod cors;

/// Request id generation for tracing correlation
pub mod request_id;

pub use cors::setup_cors;
pub use request_id::MakeExerciseRequestId;
