// ABOUTME: User management database operations
// ABOUTME: Handles user registration with atomic uniqueness and user lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::models::User;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;

impl Database {
    /// Create the users table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_users(&self) -> Result<()> {
        // The UNIQUE constraint on username makes registration a single
        // atomic insert that fails on duplicate; there is no separate
        // existence check to race against.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_username ON users(username)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new user, failing on duplicate username.
    ///
    /// Returns `Ok(None)` when the username is already taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails for any reason
    /// other than a uniqueness violation.
    pub async fn create_user(&self, user: &User) -> Result<Option<()>> {
        let result = sqlx::query(
            r"
            INSERT INTO users (id, username, created_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(Some(())),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Look up a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username, created_at FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_user(&r)).transpose()
    }

    /// Retrieve all users, oldest registration first
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_all_users(&self) -> Result<Vec<User>> {
        let rows = sqlx::query("SELECT id, username, created_at FROM users ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_user).collect()
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    Ok(User {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}
