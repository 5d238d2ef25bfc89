// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Swole: weekly workout schedules, routines and progress tracking
//!
//! This crate provides the backend API for the Swole mobile app: the
//! routine catalog, each user's weekly schedule, and per-day progress
//! recorded against individual workouts.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
}

/// Schema migrations bundled from `migrations/`.
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}
