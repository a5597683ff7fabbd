// ABOUTME: Exercise log database operations
// ABOUTME: Handles log record upserts, entry appends, and limit-sliced retrieval
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Database;
use crate::models::{ExerciseEntry, ExerciseLog};
use anyhow::Result;
use sqlx::Row;

impl Database {
    /// Create the exercise log tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails.
    pub(super) async fn migrate_logs(&self) -> Result<()> {
        // One log record per user, keyed by the user's id. The username is
        // a denormalized copy refreshed on every append.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_logs (
                user_id TEXT PRIMARY KEY REFERENCES users(id),
                username TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        // Entries ordered by insertion (id), which is submission order.
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES exercise_logs(user_id),
                description TEXT NOT NULL,
                duration REAL NOT NULL,
                date TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_entries_user ON exercise_entries(user_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert the user's log record and append one entry.
    ///
    /// Refreshes the denormalized username on every call. Both statements
    /// run in one transaction so a failed append never leaves a bare upsert.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn append_exercise(
        &self,
        user_id: &str,
        username: &str,
        entry: &ExerciseEntry,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO exercise_logs (user_id, username)
            VALUES ($1, $2)
            ON CONFLICT(user_id) DO UPDATE SET username = excluded.username
            ",
        )
        .bind(user_id)
        .bind(username)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
            INSERT INTO exercise_entries (user_id, description, duration, date)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user_id)
        .bind(&entry.description)
        .bind(entry.duration)
        .bind(&entry.date)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Load a user's exercise log, sliced to at most `limit` entries.
    ///
    /// The slice applies in submission order at the storage level, before
    /// any date filtering the caller performs. Returns `Ok(None)` when no
    /// log record exists for the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_exercise_log(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Option<ExerciseLog>> {
        let Some(log_row) =
            sqlx::query("SELECT user_id, username FROM exercise_logs WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let rows = sqlx::query(
            r"
            SELECT description, duration, date
            FROM exercise_entries
            WHERE user_id = $1
            ORDER BY id
            LIMIT $2
            ",
        )
        .bind(user_id)
        // SQLite treats a negative LIMIT as no limit
        .bind(limit.unwrap_or(-1))
        .fetch_all(&self.pool)
        .await?;

        let entries = rows
            .iter()
            .map(|r| {
                Ok(ExerciseEntry {
                    description: r.try_get("description")?,
                    duration: r.try_get("duration")?,
                    date: r.try_get("date")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Some(ExerciseLog {
            id: log_row.try_get("user_id")?,
            username: log_row.try_get("username")?,
            entries,
        }))
    }
}
