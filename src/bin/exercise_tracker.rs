// ABOUTME: Exercise tracker server binary
// ABOUTME: Loads configuration, initializes logging and storage, runs the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Exercise Tracker Server Binary
//!
//! Starts the exercise tracker HTTP API with SQLite-backed persistence.

use anyhow::Result;
use clap::Parser;
use exercise_tracker::{
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    server::{ExerciseTrackerServer, ServerResources},
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "exercise-tracker")]
#[command(about = "Exercise Tracker API - register users and log workouts")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. sqlite:./data/exercise-tracker.db)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment, then apply CLI overrides
    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = &args.database_url {
        config.database.url = DatabaseUrl::parse_url(database_url)?;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Exercise Tracker API");
    info!("{}", config.summary());

    // Open the process-scoped database connection and run migrations
    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized: {}", config.database.url);

    let resources = Arc::new(ServerResources::new(database, config));
    let server = ExerciseTrackerServer::new(resources);

    server.run().await
}
