// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Routine catalog with today's progress overlaid on each workout.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::routine::RoutineRow;
use crate::models::{RoutineView, UserId, WorkoutView};
use crate::services::identity;
use futures_util::{stream, StreamExt};
use uuid::Uuid;

/// Upper bound on concurrent per-routine workout queries in one request.
pub(crate) const MAX_CONCURRENT_ROUTINE_LOADS: usize = 8;

/// Workouts for a routine, overlaid with `user_id`'s progress for today.
///
/// Best effort: a failed query is logged and yields an empty list, so one
/// broken routine cannot blank out a whole schedule or catalog response.
pub async fn load_workouts(
    db: &Database,
    routine_id: Uuid,
    user_id: Option<UserId>,
) -> Vec<WorkoutView> {
    match db.workouts_with_progress(routine_id, user_id).await {
        Ok(workouts) => workouts,
        Err(e) => {
            tracing::warn!(%routine_id, error = %e, "Failed to load workouts for routine");
            Vec::new()
        }
    }
}

/// Expand routines with their workouts, keeping the input order.
pub async fn expand_routines(
    db: &Database,
    routines: Vec<RoutineRow>,
    user_id: Option<UserId>,
) -> Vec<RoutineView> {
    stream::iter(routines)
        .map(|routine| async move {
            let workouts = load_workouts(db, routine.id, user_id).await;
            RoutineView::new(routine, workouts)
        })
        .buffered(MAX_CONCURRENT_ROUTINE_LOADS)
        .collect()
        .await
}

/// All routines, ordered by name.
pub async fn list_routines(db: &Database, identifier: Option<&str>) -> Result<Vec<RoutineView>> {
    let user_id = identity::resolve_reader(db, identifier).await?;
    let routines = db.list_routines().await?;
    Ok(expand_routines(db, routines, user_id).await)
}

/// One routine by id.
///
/// Ids that are not UUIDs cannot exist and are reported as not found.
pub async fn get_routine(
    db: &Database,
    routine_id: &str,
    identifier: Option<&str>,
) -> Result<RoutineView> {
    let not_found = || AppError::NotFound(format!("Routine {} not found", routine_id));

    let id = Uuid::parse_str(routine_id).map_err(|_| not_found())?;
    let routine = db.get_routine(id).await?.ok_or_else(not_found)?;

    let user_id = identity::resolve_reader(db, identifier).await?;
    let workouts = load_workouts(db, id, user_id).await;
    Ok(RoutineView::new(routine, workouts))
}
