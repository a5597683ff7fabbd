// ABOUTME: Exercise API route handlers for user registration and workout logging
// ABOUTME: Validates form/query input, invokes the persistence layer, shapes JSON responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise tracking routes
//!
//! Four endpoints: register a user, list users, append an exercise entry,
//! and query a user's log with optional date-range and count filters.

use crate::{
    errors::{AppError, AppResult},
    models::{effective_date, parse_date, ExerciseEntry, User, DATE_FORMAT},
    server::ServerResources,
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Deserialize)]
pub struct NewUserRequest {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewUserResponse {
    pub username: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AddExerciseRequest {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddExerciseResponse {
    pub username: String,
    pub description: String,
    pub duration: f64,
    pub date: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogQuery {
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LogResponse {
    pub id: String,
    pub username: String,
    pub count: usize,
    pub log: Vec<ExerciseEntry>,
}

/// Exercise tracking routes
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise API routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercise/new-user", post(Self::handle_new_user))
            .route("/api/exercise/users", get(Self::handle_list_users))
            .route("/api/exercise/add", post(Self::handle_add_exercise))
            .route("/api/exercise/log", get(Self::handle_get_log))
            .with_state(resources)
    }

    /// Handle user registration
    ///
    /// Registration is a single conditional insert against the username
    /// uniqueness constraint, so two concurrent registrations of the same
    /// name cannot both succeed.
    async fn handle_new_user(
        State(resources): State<Arc<ServerResources>>,
        Form(request): Form<NewUserRequest>,
    ) -> AppResult<impl IntoResponse> {
        let username = required_field(request.username.as_deref(), "username")?;

        let user = User::new(username.to_owned());

        let inserted = resources.database.create_user(&user).await.map_err(|e| {
            error!(error = %e, "Failed to create user");
            AppError::database("Failed to create user")
        })?;

        if inserted.is_none() {
            return Err(AppError::conflict(format!(
                "Username '{username}' is already taken"
            )));
        }

        info!(user_id = %user.id, username = %user.username, "User registered");

        Ok(Json(NewUserResponse {
            username: user.username,
            id: user.id,
        }))
    }

    /// Handle listing all users
    async fn handle_list_users(
        State(resources): State<Arc<ServerResources>>,
    ) -> AppResult<impl IntoResponse> {
        let users = resources.database.get_all_users().await.map_err(|e| {
            error!(error = %e, "Failed to fetch users");
            AppError::database("Failed to fetch users")
        })?;

        let summaries: Vec<UserSummary> = users
            .into_iter()
            .map(|user| UserSummary {
                username: user.username,
                id: user.id,
            })
            .collect();

        Ok(Json(summaries))
    }

    /// Handle appending an exercise entry to a user's log
    async fn handle_add_exercise(
        State(resources): State<Arc<ServerResources>>,
        Form(request): Form<AddExerciseRequest>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = required_field(request.user_id.as_deref(), "userId")?;
        let description = required_field(request.description.as_deref(), "description")?;
        let duration = required_field(request.duration.as_deref(), "duration")?
            .parse::<f64>()
            .map_err(|_| AppError::invalid_format("duration", "expected a number of minutes"))?;

        // Resolve the user first and stop if absent; the log collection is
        // never touched for a non-existent user.
        let user = resources
            .database
            .get_user(user_id)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "Failed to look up user");
                AppError::database("Failed to look up user")
            })?
            .ok_or_else(|| AppError::not_found(format!("User '{user_id}'")))?;

        // A missing or malformed date falls back to today, never an error
        let date = effective_date(request.date.as_deref())
            .format(DATE_FORMAT)
            .to_string();

        let entry = ExerciseEntry {
            description: description.to_owned(),
            duration,
            date,
        };

        resources
            .database
            .append_exercise(&user.id, &user.username, &entry)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = %user.id, "Failed to append exercise");
                AppError::database("Failed to append exercise")
            })?;

        info!(
            user_id = %user.id,
            duration = entry.duration,
            date = %entry.date,
            "Exercise logged"
        );

        Ok(Json(AddExerciseResponse {
            username: user.username,
            description: entry.description,
            duration: entry.duration,
            date: entry.date,
            id: user.id,
        }))
    }

    /// Handle querying a user's exercise log with optional filters
    async fn handle_get_log(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<LogQuery>,
    ) -> AppResult<impl IntoResponse> {
        let user_id = required_field(query.user_id.as_deref(), "userId")?;

        let limit = query
            .limit
            .as_deref()
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|n| *n >= 0)
                    .ok_or_else(|| {
                        AppError::invalid_format("limit", "expected a non-negative integer")
                    })
            })
            .transpose()?;

        // Storage-level slice first (submission order), date filter second
        let log = resources
            .database
            .get_exercise_log(user_id, limit)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "Failed to load exercise log");
                AppError::database("Failed to load exercise log")
            })?
            .ok_or_else(|| AppError::not_found(format!("Exercise log for user '{user_id}'")))?;

        // Unparseable bounds behave as absent filters
        let from = query.from.as_deref().and_then(parse_date);
        let to = query.to.as_deref().and_then(parse_date);

        let filtered: Vec<ExerciseEntry> = log
            .entries
            .into_iter()
            .filter(|entry| {
                parse_date(&entry.date).map_or(false, |date| {
                    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
                })
            })
            .collect();

        Ok(Json(LogResponse {
            id: log.id,
            username: log.username,
            count: filtered.len(),
            log: filtered,
        }))
    }
}

/// Extract a required, non-empty field value or fail naming the field
fn required_field<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::missing_field(field)),
    }
}
