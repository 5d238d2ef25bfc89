// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Swole API Server
//!
//! Serves the weekly workout schedule, the routine catalog and per-user
//! progress tracking for the Swole mobile app.

use anyhow::Context;
use std::sync::Arc;
use swole_api::{
    config::Config,
    db::{seed_demo_data, Database},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Swole API");

    // Connect to Postgres
    let db = Database::connect(&config.database)
        .await
        .context("Failed to connect to Postgres")?;

    if config.run_migrations {
        db.migrate().await.context("Failed to apply migrations")?;
    } else {
        tracing::info!("Skipping migrations; schema is provisioned externally");
    }

    if config.seed_demo_data {
        seed_demo_data(&db)
            .await
            .context("Failed to seed demo data")?;
    }

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
    });

    // Build router
    let app = swole_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("swole_api=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
