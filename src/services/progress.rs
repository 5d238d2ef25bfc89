// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Recording and reading per-day workout progress.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{ProgressEntry, ProgressUpdate};
use crate::services::identity;
use crate::time_utils::format_iso_date;
use uuid::Uuid;

/// Record today's outcome for a workout.
///
/// The user must be identified exactly; progress is never written against a
/// fallback user. Repeated submissions on the same day overwrite the earlier
/// values (see [`Database::upsert_progress`]).
pub async fn record_progress(db: &Database, workout_id: &str, update: ProgressUpdate) -> Result<()> {
    validate_update(&update)?;
    let workout_id = parse_workout_id(workout_id)?;
    let user_id = identity::resolve_writer(db, update.user_id.as_deref()).await?;

    db.upsert_progress(user_id, workout_id, update.user_weight, update.user_time)
        .await
        .map_err(|e| match e {
            // Foreign key miss: users are resolved above, so it's the workout.
            AppError::NotFound(_) => AppError::NotFound(format!("Workout {} not found", workout_id)),
            other => other,
        })?;

    tracing::info!(
        %user_id,
        %workout_id,
        weight = ?update.user_weight,
        time = ?update.user_time,
        "Recorded workout progress"
    );
    Ok(())
}

/// The most recent recorded days for one workout, newest first.
pub async fn progress_history(
    db: &Database,
    identifier: Option<&str>,
    workout_id: Option<&str>,
) -> Result<Vec<ProgressEntry>> {
    let user_id = identity::resolve_writer(db, identifier).await?;
    let workout_id = workout_id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("workout_id is required".to_string()))?;
    let workout_id = parse_workout_id(workout_id)?;

    let rows = db.progress_history(user_id, workout_id).await?;
    Ok(rows
        .into_iter()
        .map(|row| ProgressEntry {
            date: format_iso_date(row.date),
            weight: row.weight,
            time: row.time,
        })
        .collect())
}

fn parse_workout_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid workout id: {}", raw)))
}

fn validate_update(update: &ProgressUpdate) -> Result<()> {
    if update.user_weight.is_some_and(|w| !w.is_finite() || w < 0.0) {
        return Err(AppError::BadRequest(
            "userWeight must be a non-negative number".to_string(),
        ));
    }
    if update.user_time.is_some_and(|t| t < 0) {
        return Err(AppError::BadRequest(
            "userTime must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_values_are_valid() {
        let update = ProgressUpdate {
            user_id: Some("user@example.com".to_string()),
            user_weight: Some(0.0),
            user_time: Some(0),
        };
        assert!(validate_update(&update).is_ok());
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let weight = ProgressUpdate {
            user_weight: Some(-5.0),
            ..Default::default()
        };
        assert!(matches!(validate_update(&weight), Err(AppError::BadRequest(_))));

        let time = ProgressUpdate {
            user_time: Some(-1),
            ..Default::default()
        };
        assert!(matches!(validate_update(&time), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_workout_id_must_be_uuid() {
        assert!(parse_workout_id("42").is_err());
        let id = Uuid::new_v4();
        assert_eq!(parse_workout_id(&id.to_string()).unwrap(), id);
    }
}
