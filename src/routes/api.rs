// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API routes.
//!
//! There is no authentication: callers name themselves with a `user_id`
//! (email or id) that is resolved per request.

use crate::error::{AppError, Result};
use crate::models::{ProgressEntry, ProgressUpdate, RoutineView, WeekScheduleView};
use crate::services;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/week-schedule", get(get_week_schedule))
        .route("/api/routines", get(get_routines))
        .route("/api/routines/{id}", get(get_routine))
        // The mobile client sends PUT; POST is the canonical method.
        .route(
            "/api/workouts/{id}/progress",
            post(record_progress).put(record_progress),
        )
        .route("/api/progress", get(get_progress))
        .route("/api/user-progress", get(get_progress))
}

/// `?user_id=` accepted by the browsing endpoints.
#[derive(Debug, Deserialize)]
struct UserQuery {
    user_id: Option<String>,
}

// ─── Schedule ────────────────────────────────────────────────

async fn get_week_schedule(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<WeekScheduleView>> {
    let week = services::build_week(&state.db, params.user_id.as_deref()).await?;
    Ok(Json(week))
}

// ─── Routines ────────────────────────────────────────────────

async fn get_routines(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<RoutineView>>> {
    let routines = services::list_routines(&state.db, params.user_id.as_deref()).await?;
    Ok(Json(routines))
}

async fn get_routine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<UserQuery>,
) -> Result<Json<RoutineView>> {
    let routine = services::get_routine(&state.db, &id, params.user_id.as_deref()).await?;
    Ok(Json(routine))
}

// ─── Progress ────────────────────────────────────────────────

/// Acknowledgement for a recorded progress update.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "swoleMobile/src/types/generated/")
)]
pub struct StatusResponse {
    pub status: String,
}

async fn record_progress(
    State(state): State<Arc<AppState>>,
    Path(workout_id): Path<String>,
    payload: std::result::Result<Json<ProgressUpdate>, JsonRejection>,
) -> Result<Json<StatusResponse>> {
    let Json(update) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected progress body");
        AppError::BadRequest(rejection.body_text())
    })?;

    services::record_progress(&state.db, &workout_id, update).await?;

    Ok(Json(StatusResponse {
        status: "success".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
struct ProgressQuery {
    user_id: Option<String>,
    workout_id: Option<String>,
}

async fn get_progress(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ProgressQuery>,
) -> Result<Json<Vec<ProgressEntry>>> {
    let entries = services::progress_history(
        &state.db,
        params.user_id.as_deref(),
        params.workout_id.as_deref(),
    )
    .await?;
    Ok(Json(entries))
}
