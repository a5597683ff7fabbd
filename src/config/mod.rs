// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Handles environment variables, deployment modes, and runtime parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration module for the exercise tracker
//!
//! Provides centralized configuration management:
//!
//! - **Environment**: Server configuration from environment variables

/// Environment and server configuration
pub mod environment;
