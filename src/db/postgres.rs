// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Postgres client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (identifier lookups)
//! - Routines and workouts (with today's progress overlay)
//! - Week schedules (week -> day -> routine join)
//! - User progress (atomic per-day upsert, history)
//!
//! Every query borrows the pool, so the connection goes back to the pool
//! when the query future completes, on success and on error alike.

use crate::config::DatabaseConfig;
use crate::error::AppError;
use crate::models::progress::ProgressRow;
use crate::models::routine::{RoutineRow, WorkoutRow};
use crate::models::schedule::ScheduleRow;
use crate::models::{UserId, Weekday, WorkoutView};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::FromRow;
use uuid::Uuid;

/// Maximum number of week/day/routine rows read for one schedule.
pub const SCHEDULE_ROW_LIMIT: i64 = 100;
/// Maximum number of days returned by a progress history lookup.
pub const PROGRESS_HISTORY_LIMIT: i64 = 10;

/// Postgres database client.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to Postgres and verify the connection.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Postgres: {}", e)))?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "Connected to Postgres"
        );

        Ok(Self { pool })
    }

    /// Create a client whose pool connects on first use.
    ///
    /// Nothing is contacted until a query runs, so this works offline; any
    /// query against an unreachable server fails with [`AppError::Database`].
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_lazy_with(config.connect_options());
        Self { pool }
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query to check the store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        crate::migrator()
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
        tracing::info!("Database schema is up to date");
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    pub async fn find_user_id_by_email(&self, email: &str) -> Result<Option<UserId>, AppError> {
        let id = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = $1 LIMIT 1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    pub async fn find_user_id(&self, id: UserId) -> Result<Option<UserId>, AppError> {
        let id = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    /// Earliest-created user, if any.
    pub async fn first_user_id(&self) -> Result<Option<UserId>, AppError> {
        let id = sqlx::query_scalar::<_, UserId>("SELECT id FROM users ORDER BY created_at, id LIMIT 1")
            .fetch_optional(&self.pool)
            .await?;
        Ok(id)
    }

    // ─── Routine Operations ──────────────────────────────────────

    pub async fn get_routine(&self, id: Uuid) -> Result<Option<RoutineRow>, AppError> {
        let routine = sqlx::query_as::<_, RoutineRow>(
            "SELECT id, name, description FROM routines WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(routine)
    }

    /// All routines ordered by name. Rows that fail to decode are skipped.
    pub async fn list_routines(&self) -> Result<Vec<RoutineRow>, AppError> {
        let rows = sqlx::query("SELECT id, name, description FROM routines ORDER BY name, id")
            .fetch_all(&self.pool)
            .await?;
        Ok(decode_rows(&rows, "routine"))
    }

    /// Workouts of a routine in creation order, each overlaid with the
    /// given user's progress for the current date.
    ///
    /// Without a user the join matches nothing and no overlay is present.
    /// Rows that fail to decode are skipped.
    pub async fn workouts_with_progress(
        &self,
        routine_id: Uuid,
        user_id: Option<UserId>,
    ) -> Result<Vec<WorkoutView>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT w.id, w.name, w.type AS workout_type, w.exercise_type,
                   w.weight, w.time, w.reps, w.sets, w.description,
                   up.weight AS user_weight, up.time AS user_time
            FROM workouts w
            LEFT JOIN user_progress up ON up.workout_id = w.id
                AND up.user_id = $2
                AND up.date = CURRENT_DATE
            WHERE w.routine_id = $1
            ORDER BY w.created_at, w.id
            "#,
        )
        .bind(routine_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let workouts = decode_rows::<WorkoutRow>(&rows, "workout")
            .into_iter()
            .filter_map(|row| {
                let workout_id = row.id;
                WorkoutView::try_from(row)
                    .map_err(|e| {
                        tracing::warn!(%workout_id, error = %e, "Skipping unreadable workout row");
                    })
                    .ok()
            })
            .collect();
        Ok(workouts)
    }

    // ─── Schedule Operations ─────────────────────────────────────

    /// Week -> day -> routine join for a user, newest week first, then
    /// Monday..Sunday, then attachment position. Capped at
    /// [`SCHEDULE_ROW_LIMIT`] rows; rows that fail to decode are skipped.
    pub async fn schedule_rows(&self, user_id: Option<UserId>) -> Result<Vec<ScheduleRow>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT ds.day, r.id AS routine_id, r.name AS routine_name,
                   r.description AS routine_description
            FROM week_schedules ws
            LEFT JOIN day_schedules ds ON ds.week_id = ws.id
            LEFT JOIN day_routines dr ON dr.day_id = ds.id
            LEFT JOIN routines r ON r.id = dr.routine_id
            WHERE ws.user_id = $1
            ORDER BY ws.week_start DESC,
                     array_position($2::text[], ds.day::text),
                     dr.position
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(Weekday::names())
        .bind(SCHEDULE_ROW_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(decode_rows(&rows, "schedule"))
    }

    // ─── Progress Operations ─────────────────────────────────────

    /// Record today's outcome for a workout.
    ///
    /// A single `INSERT .. ON CONFLICT DO UPDATE`: the unique key
    /// `(user_id, workout_id, date)` keeps exactly one row per day, and
    /// the latest values win even under concurrent submissions.
    pub async fn upsert_progress(
        &self,
        user_id: UserId,
        workout_id: Uuid,
        weight: Option<f64>,
        time: Option<i32>,
    ) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO user_progress (user_id, workout_id, weight, time, date)
            VALUES ($1, $2, $3, $4, CURRENT_DATE)
            ON CONFLICT (user_id, workout_id, date)
            DO UPDATE SET weight = EXCLUDED.weight, time = EXCLUDED.time
            "#,
        )
        .bind(user_id)
        .bind(workout_id)
        .bind(weight)
        .bind(time)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Most recent progress entries for a workout, newest first.
    pub async fn progress_history(
        &self,
        user_id: UserId,
        workout_id: Uuid,
    ) -> Result<Vec<ProgressRow>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT weight, time, date
            FROM user_progress
            WHERE user_id = $1 AND workout_id = $2
            ORDER BY date DESC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(workout_id)
        .bind(PROGRESS_HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(decode_rows(&rows, "progress"))
    }
}

/// Decode each row independently, logging and dropping the ones that fail.
fn decode_rows<T>(rows: &[PgRow], kind: &'static str) -> Vec<T>
where
    T: for<'r> FromRow<'r, PgRow>,
{
    rows.iter()
        .filter_map(|row| {
            T::from_row(row)
                .map_err(|e| tracing::warn!(kind, error = %e, "Skipping unreadable row"))
                .ok()
        })
        .collect()
}
