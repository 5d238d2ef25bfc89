// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Demo data for a fresh database.
//!
//! Seeding only happens when the routine catalog is empty, so restarts and
//! externally provisioned catalogs are left alone.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{ExerciseType, Weekday, WEEKDAYS};
use uuid::Uuid;

pub const DEMO_USER_EMAIL: &str = "user@example.com";
const DEMO_USER_NAME: &str = "Default User";

struct SeedWorkout {
    name: &'static str,
    workout_type: Option<&'static str>,
    exercise_type: ExerciseType,
    weight: Option<f64>,
    time: Option<i32>,
    reps: Option<i32>,
    sets: Option<i32>,
    description: &'static str,
}

struct SeedRoutine {
    name: &'static str,
    description: &'static str,
    workouts: &'static [SeedWorkout],
}

const fn lift(
    name: &'static str,
    workout_type: &'static str,
    weight: Option<f64>,
    reps: i32,
    sets: i32,
    description: &'static str,
) -> SeedWorkout {
    SeedWorkout {
        name,
        workout_type: Some(workout_type),
        exercise_type: ExerciseType::Lift,
        weight,
        time: None,
        reps: Some(reps),
        sets: Some(sets),
        description,
    }
}

const ROUTINES: &[SeedRoutine] = &[
    SeedRoutine {
        name: "Upper Body Power",
        description: "Intense upper body workout focusing on strength",
        workouts: &[
            lift("Bench Press", "upper_body", Some(135.0), 8, 4, "Flat bench with barbell"),
            lift("Pull-ups", "upper_body", None, 10, 3, "Wide grip pull-ups"),
            lift("Shoulder Press", "upper_body", Some(95.0), 10, 3, "Overhead press with barbell"),
        ],
    },
    SeedRoutine {
        name: "Leg Day",
        description: "Complete lower body workout",
        workouts: &[
            lift("Squats", "lower_body", Some(225.0), 8, 4, "Back squats with proper depth"),
            lift("Romanian Deadlifts", "lower_body", Some(185.0), 10, 3, "Focus on hamstring stretch"),
            lift("Leg Press", "lower_body", Some(360.0), 12, 3, "Full range of motion"),
        ],
    },
    SeedRoutine {
        name: "Core Circuit",
        description: "Abs and core strengthening",
        workouts: &[
            SeedWorkout {
                name: "Plank",
                workout_type: Some("abs"),
                exercise_type: ExerciseType::Timed,
                weight: None,
                time: Some(60),
                reps: None,
                sets: Some(3),
                description: "Hold plank position",
            },
            lift("Russian Twists", "abs", Some(25.0), 20, 3, "With medicine ball"),
            lift("Leg Raises", "abs", None, 15, 3, "Hanging leg raises"),
        ],
    },
    SeedRoutine {
        name: "Basketball Practice",
        description: "Weekly basketball session",
        workouts: &[SeedWorkout {
            name: "Basketball",
            workout_type: None,
            exercise_type: ExerciseType::Activity,
            weight: None,
            time: Some(90),
            reps: None,
            sets: None,
            description: "Full court games and drills",
        }],
    },
    SeedRoutine {
        name: "Yoga Class",
        description: "Flexibility and mindfulness",
        workouts: &[SeedWorkout {
            name: "Vinyasa Yoga",
            workout_type: None,
            exercise_type: ExerciseType::Class,
            weight: None,
            time: Some(60),
            reps: None,
            sets: None,
            description: "Flow yoga class",
        }],
    },
];

/// Routines attached to each day, as indexes into [`ROUTINES`], in position order.
fn demo_plan(day: Weekday) -> &'static [usize] {
    match day {
        Weekday::Monday | Weekday::Thursday => &[0],
        Weekday::Tuesday | Weekday::Friday => &[1],
        Weekday::Wednesday => &[4],
        Weekday::Saturday => &[2, 3],
        Weekday::Sunday => &[],
    }
}

/// Inserted routine ids for `day`, in position order.
fn planned_routines(day: Weekday, routine_ids: &[Uuid]) -> Result<Vec<Uuid>, AppError> {
    demo_plan(day)
        .iter()
        .map(|&index| {
            routine_ids.get(index).copied().ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "{} plan references missing routine {}",
                    day.name(),
                    index
                ))
            })
        })
        .collect()
}

/// Seed the demo user, routine catalog and a sample week.
///
/// Returns `false` without writing anything when routines already exist.
/// Everything is inserted in one transaction.
pub async fn seed_demo_data(db: &Database) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM routines")
        .fetch_one(db.pool())
        .await?;
    if count > 0 {
        tracing::info!(routines = count, "Data already exists, skipping seed");
        return Ok(false);
    }

    let mut tx = db.pool().begin().await?;

    let user_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO users (email, name) VALUES ($1, $2)
        ON CONFLICT (email) DO UPDATE SET name = users.name
        RETURNING id
        "#,
    )
    .bind(DEMO_USER_EMAIL)
    .bind(DEMO_USER_NAME)
    .fetch_one(&mut *tx)
    .await?;

    let mut routine_ids = Vec::with_capacity(ROUTINES.len());
    for routine in ROUTINES {
        let routine_id: Uuid = sqlx::query_scalar(
            "INSERT INTO routines (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(routine.name)
        .bind(routine.description)
        .fetch_one(&mut *tx)
        .await?;

        for workout in routine.workouts {
            sqlx::query(
                r#"
                INSERT INTO workouts
                    (routine_id, name, type, exercise_type, weight, time, reps, sets, description)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                "#,
            )
            .bind(routine_id)
            .bind(workout.name)
            .bind(workout.workout_type)
            .bind(workout.exercise_type.as_str())
            .bind(workout.weight)
            .bind(workout.time)
            .bind(workout.reps)
            .bind(workout.sets)
            .bind(workout.description)
            .execute(&mut *tx)
            .await?;
        }

        routine_ids.push(routine_id);
    }

    // Weeks start on the Sunday on or before today.
    let week_id: Uuid = sqlx::query_scalar(
        r#"
        INSERT INTO week_schedules (user_id, week_start)
        VALUES ($1, CURRENT_DATE - EXTRACT(DOW FROM CURRENT_DATE)::INTEGER)
        ON CONFLICT (user_id, week_start) DO UPDATE SET updated_at = NOW()
        RETURNING id
        "#,
    )
    .bind(user_id)
    .fetch_one(&mut *tx)
    .await?;

    for day in WEEKDAYS {
        let day_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO day_schedules (week_id, day) VALUES ($1, $2)
            ON CONFLICT (week_id, day) DO UPDATE SET updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(week_id)
        .bind(day.name())
        .fetch_one(&mut *tx)
        .await?;

        let planned = planned_routines(day, &routine_ids)?;
        for (position, routine_id) in planned.into_iter().enumerate() {
            sqlx::query(
                "INSERT INTO day_routines (day_id, routine_id, position) VALUES ($1, $2, $3)",
            )
            .bind(day_id)
            .bind(routine_id)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;

    tracing::info!(
        user = DEMO_USER_EMAIL,
        routines = routine_ids.len(),
        "Seed data inserted"
    );
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_plan_references_known_routines() {
        for day in WEEKDAYS {
            for &index in demo_plan(day) {
                assert!(index < ROUTINES.len(), "{:?} references routine {}", day, index);
            }
        }
    }

    #[test]
    fn test_sunday_is_a_rest_day() {
        assert!(demo_plan(Weekday::Sunday).is_empty());
        assert_eq!(demo_plan(Weekday::Saturday), &[2, 3]);
    }

    #[test]
    fn test_planned_routines_follow_plan_order() {
        let ids: Vec<Uuid> = ROUTINES.iter().map(|_| Uuid::new_v4()).collect();
        assert_eq!(
            planned_routines(Weekday::Saturday, &ids).unwrap(),
            vec![ids[2], ids[3]]
        );
        assert!(planned_routines(Weekday::Sunday, &ids).unwrap().is_empty());
    }

    #[test]
    fn test_planned_routines_with_missing_ids_is_internal_error() {
        let ids = vec![Uuid::new_v4()];
        let err = planned_routines(Weekday::Wednesday, &ids).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_every_routine_has_workouts() {
        assert!(ROUTINES.iter().all(|r| !r.workouts.is_empty()));
    }
}
