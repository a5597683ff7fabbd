// ABOUTME: Common data models for users, exercise entries, and exercise logs
// ABOUTME: Handles short id generation and calendar-date defaulting for entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data models for the exercise tracker
//!
//! A `User` is registered once and never updated. An `ExerciseLog` is the
//! per-user record keyed by the user's id, accumulating one `ExerciseEntry`
//! per add-call in submission order.

use chrono::{DateTime, NaiveDate, Utc};
use rand::{distributions::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

/// Length of generated user ids
const USER_ID_LEN: usize = 8;

/// Date format used for entry dates (calendar-date granularity)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Short unique identifier, generated at creation time, immutable
    pub id: String,
    /// Caller-supplied username, unique across the users table
    pub username: String,
    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a freshly generated short id
    #[must_use]
    pub fn new(username: String) -> Self {
        Self {
            id: generate_user_id(),
            username,
            created_at: Utc::now(),
        }
    }
}

/// A single exercise entry within a user's log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    /// What the exercise was
    pub description: String,
    /// Duration in minutes
    pub duration: f64,
    /// Calendar date (`YYYY-MM-DD`), no time-of-day component
    pub date: String,
}

/// A user's exercise log: the log record plus its entries in submission order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Equal to the owning user's id
    pub id: String,
    /// Denormalized username, refreshed on every append
    pub username: String,
    /// Entries in submission order (not date order)
    pub entries: Vec<ExerciseEntry>,
}

/// Generate a short alphanumeric user id
#[must_use]
pub fn generate_user_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(USER_ID_LEN)
        .map(char::from)
        .collect()
}

/// Compute the effective calendar date for a new entry.
///
/// Parses `raw` as `YYYY-MM-DD`; an absent or unparseable date falls back to
/// the current UTC date. A malformed date must never fail the request.
#[must_use]
pub fn effective_date(raw: Option<&str>) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
        .unwrap_or_else(|| Utc::now().date_naive())
}

/// Parse a stored or query-supplied calendar date, `None` when unparseable
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_short_and_unique() {
        let a = generate_user_id();
        let b = generate_user_id();
        assert_eq!(a.len(), USER_ID_LEN);
        assert!(a.chars().all(char::is_alphanumeric));
        assert_ne!(a, b);
    }

    #[test]
    fn test_effective_date_parses_valid_input() {
        let date = effective_date(Some("2020-02-01"));
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 1).unwrap());
    }

    #[test]
    fn test_effective_date_falls_back_to_today() {
        let today = Utc::now().date_naive();
        assert_eq!(effective_date(None), today);
        assert_eq!(effective_date(Some("not-a-date")), today);
        assert_eq!(effective_date(Some("2020-13-45")), today);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("2020-01-15").is_some());
        assert!(parse_date("garbage").is_none());
    }
}
