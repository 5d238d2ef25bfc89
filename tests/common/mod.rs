// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use std::sync::Arc;
use std::time::Duration;
use swole_api::config::{Config, DatabaseConfig};
use swole_api::db::Database;
use swole_api::models::Weekday;
use swole_api::routes::create_router;
use swole_api::AppState;
use uuid::Uuid;

/// Check if a test database is available via environment variable.
#[allow(dead_code)]
pub fn database_available() -> bool {
    std::env::var("DATABASE_URL").is_ok()
}

/// Skip test with message if no database is configured.
#[macro_export]
macro_rules! require_database {
    () => {
        if !crate::common::database_available() {
            eprintln!("⚠️  Skipping: DATABASE_URL not set");
            return;
        }
    };
}

/// Connect to the test database and bring the schema up to date.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    let db = Database::from_pool(pool);
    db.migrate().await.expect("Failed to run migrations");
    db
}

/// Create an empty, migrated database of its own next to the one named by
/// `DATABASE_URL`. Returns the client and the database name for
/// [`drop_isolated_db`].
#[allow(dead_code)]
pub async fn isolated_db() -> (Database, String) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let name = format!("swole_test_{}", Uuid::new_v4().simple());

    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    let create = format!("CREATE DATABASE {}", name);
    sqlx::raw_sql(&create)
        .execute(&admin)
        .await
        .expect("Failed to create isolated database");
    admin.close().await;

    let options: PgConnectOptions = url.parse().expect("Invalid DATABASE_URL");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect_with(options.database(&name))
        .await
        .expect("Failed to connect to isolated database");
    let db = Database::from_pool(pool);
    db.migrate().await.expect("Failed to run migrations");
    (db, name)
}

/// Close `db` and drop the database created by [`isolated_db`].
#[allow(dead_code)]
pub async fn drop_isolated_db(db: Database, name: &str) {
    db.pool().close().await;

    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
    let admin = PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to test database");
    let drop = format!("DROP DATABASE IF EXISTS {} WITH (FORCE)", name);
    sqlx::raw_sql(&drop)
        .execute(&admin)
        .await
        .expect("Failed to drop isolated database");
    admin.close().await;
}

/// Database whose pool points at a closed port (offline mode).
///
/// Construction never connects; any query fails after a short timeout.
#[allow(dead_code)]
pub fn test_db_offline() -> Database {
    Database::connect_lazy(&DatabaseConfig {
        port: 1,
        acquire_timeout: Duration::from_millis(200),
        ..DatabaseConfig::default()
    })
}

/// Create a test app backed by `db`.
#[allow(dead_code)]
pub fn create_app(db: Database) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::default(),
        db,
    });
    (create_router(state.clone()), state)
}

/// Create a test app with an offline database.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_app(test_db_offline())
}

// ─── Fixtures ────────────────────────────────────────────────

/// Insert a user with a unique email. Returns (id, email).
#[allow(dead_code)]
pub async fn create_user(db: &Database) -> (Uuid, String) {
    let email = format!("lifter-{}@example.com", Uuid::new_v4());
    let id: Uuid = sqlx::query_scalar("INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id")
        .bind(&email)
        .bind("Test Lifter")
        .fetch_one(db.pool())
        .await
        .expect("Failed to create user");
    (id, email)
}

/// Insert a routine with lift workouts named `workouts`, in that order.
/// Returns (routine id, workout ids).
#[allow(dead_code)]
pub async fn create_routine(db: &Database, name: &str, workouts: &[&str]) -> (Uuid, Vec<Uuid>) {
    let routine_id: Uuid =
        sqlx::query_scalar("INSERT INTO routines (name, description) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(format!("{} description", name))
            .fetch_one(db.pool())
            .await
            .expect("Failed to create routine");

    let mut workout_ids = Vec::new();
    for workout in workouts {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO workouts (routine_id, name, type, exercise_type, weight, reps, sets)
            VALUES ($1, $2, 'upper_body', 'lift', 100, 8, 3)
            RETURNING id
            "#,
        )
        .bind(routine_id)
        .bind(*workout)
        .fetch_one(db.pool())
        .await
        .expect("Failed to create workout");
        workout_ids.push(id);
    }

    (routine_id, workout_ids)
}

/// Create this week's schedule for `user_id` with all seven days.
/// Returns the day_schedules ids keyed by weekday.
#[allow(dead_code)]
pub async fn create_week(db: &Database, user_id: Uuid) -> Vec<(Weekday, Uuid)> {
    let week_id: Uuid = sqlx::query_scalar(
        "INSERT INTO week_schedules (user_id, week_start) VALUES ($1, CURRENT_DATE) RETURNING id",
    )
    .bind(user_id)
    .fetch_one(db.pool())
    .await
    .expect("Failed to create week");

    let mut days = Vec::new();
    for day in swole_api::models::WEEKDAYS {
        let day_id: Uuid = sqlx::query_scalar(
            "INSERT INTO day_schedules (week_id, day) VALUES ($1, $2) RETURNING id",
        )
        .bind(week_id)
        .bind(day.name())
        .fetch_one(db.pool())
        .await
        .expect("Failed to create day");
        days.push((day, day_id));
    }
    days
}

/// Attach a routine to a day at `position`.
#[allow(dead_code)]
pub async fn attach_routine(db: &Database, day_id: Uuid, routine_id: Uuid, position: i32) {
    sqlx::query("INSERT INTO day_routines (day_id, routine_id, position) VALUES ($1, $2, $3)")
        .bind(day_id)
        .bind(routine_id)
        .bind(position)
        .execute(db.pool())
        .await
        .expect("Failed to attach routine");
}

/// Number of progress rows for a (user, workout) pair across all dates.
#[allow(dead_code)]
pub async fn count_progress(db: &Database, user_id: Uuid, workout_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_progress WHERE user_id = $1 AND workout_id = $2")
        .bind(user_id)
        .bind(workout_id)
        .fetch_one(db.pool())
        .await
        .expect("Failed to count progress")
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&body).expect("Body is not JSON")
}
