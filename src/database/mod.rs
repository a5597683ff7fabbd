// ABOUTME: Database access layer over SQLite for users and exercise logs
// ABOUTME: Owns the connection pool and runs idempotent schema migrations at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Database Management
//!
//! This module provides database functionality for the exercise tracker.
//! The connection pool is a process-scoped resource: opened once at startup,
//! shared by all handlers, and closed at shutdown.

mod logs;
mod users;

use anyhow::Result;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

/// Database manager for user and exercise log storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// schema migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        let is_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if is_memory || !database_url.starts_with("sqlite:") {
            database_url.to_owned()
        } else {
            format!("{database_url}?mode=rwc")
        };

        // Every connection to sqlite::memory: opens its own empty database,
        // so an in-memory pool must hold exactly one connection or the
        // migrated schema is lost on the second acquire.
        let max_connections = if is_memory { 1 } else { 5 };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(&connection_options)
            .await?;

        let db = Self { pool };

        // Run migrations
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_logs().await?;
        Ok(())
    }

    /// Close the connection pool
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
