// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Routine and workout models for storage and API.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// How a workout is performed and tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "swoleMobile/src/types/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Lift,
    Timed,
    Class,
    Activity,
}

impl ExerciseType {
    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseType::Lift => "lift",
            ExerciseType::Timed => "timed",
            ExerciseType::Class => "class",
            ExerciseType::Activity => "activity",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown exercise type: {0}")]
pub struct UnknownExerciseType(pub String);

impl FromStr for ExerciseType {
    type Err = UnknownExerciseType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lift" => Ok(ExerciseType::Lift),
            "timed" => Ok(ExerciseType::Timed),
            "class" => Ok(ExerciseType::Class),
            "activity" => Ok(ExerciseType::Activity),
            other => Err(UnknownExerciseType(other.to_string())),
        }
    }
}

/// Routine row (`routines` table).
#[derive(Debug, Clone, FromRow)]
pub struct RoutineRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

/// Workout row left-joined with today's progress for one user.
#[derive(Debug, Clone, FromRow)]
pub struct WorkoutRow {
    pub id: Uuid,
    pub name: String,
    pub workout_type: Option<String>,
    pub exercise_type: String,
    pub weight: Option<f64>,
    pub time: Option<i32>,
    pub reps: Option<i32>,
    pub sets: Option<i32>,
    pub description: Option<String>,
    pub user_weight: Option<f64>,
    pub user_time: Option<i32>,
}

/// A workout as returned to clients: the static definition plus the
/// overlay of today's recorded progress, if any.
///
/// Absent values are omitted from the JSON rather than sent as `null`,
/// so "nothing recorded" stays distinguishable from a recorded zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "swoleMobile/src/types/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutView {
    pub id: Uuid,
    pub name: String,
    /// Muscle-group tag (`upper_body`, `lower_body`, `abs`, ...)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    pub exercise_type: ExerciseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Planned duration in minutes (or seconds for timed holds)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_time: Option<i32>,
}

impl TryFrom<WorkoutRow> for WorkoutView {
    type Error = UnknownExerciseType;

    fn try_from(row: WorkoutRow) -> Result<Self, Self::Error> {
        Ok(Self {
            exercise_type: row.exercise_type.parse()?,
            id: row.id,
            name: row.name,
            workout_type: row.workout_type,
            weight: row.weight,
            time: row.time,
            reps: row.reps,
            sets: row.sets,
            description: row.description,
            user_weight: row.user_weight,
            user_time: row.user_time,
        })
    }
}

/// A routine with its workouts expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "swoleMobile/src/types/generated/")
)]
pub struct RoutineView {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub workouts: Vec<WorkoutView>,
}

impl RoutineView {
    pub fn new(routine: RoutineRow, workouts: Vec<WorkoutView>) -> Self {
        Self {
            id: routine.id,
            name: routine.name,
            description: routine.description,
            workouts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bench_press_row() -> WorkoutRow {
        WorkoutRow {
            id: Uuid::new_v4(),
            name: "Bench Press".to_string(),
            workout_type: Some("upper_body".to_string()),
            exercise_type: "lift".to_string(),
            weight: Some(135.0),
            time: None,
            reps: Some(8),
            sets: Some(4),
            description: None,
            user_weight: None,
            user_time: None,
        }
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let view = WorkoutView::try_from(bench_press_row()).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj["type"], "upper_body");
        assert_eq!(obj["exerciseType"], "lift");
        assert_eq!(obj["weight"], 135.0);
        assert!(!obj.contains_key("time"));
        assert!(!obj.contains_key("description"));
        assert!(!obj.contains_key("userWeight"));
        assert!(!obj.contains_key("userTime"));
    }

    #[test]
    fn test_recorded_zero_is_kept() {
        let mut row = bench_press_row();
        row.user_weight = Some(0.0);
        row.user_time = Some(0);

        let json = serde_json::to_value(WorkoutView::try_from(row).unwrap()).unwrap();

        assert_eq!(json["userWeight"], 0.0);
        assert_eq!(json["userTime"], 0);
    }

    #[test]
    fn test_unknown_exercise_type_is_rejected() {
        let mut row = bench_press_row();
        row.exercise_type = "swim".to_string();

        let err = WorkoutView::try_from(row).unwrap_err();
        assert_eq!(err.0, "swim");
    }

    #[test]
    fn test_exercise_type_round_trips_through_str() {
        for ty in [
            ExerciseType::Lift,
            ExerciseType::Timed,
            ExerciseType::Class,
            ExerciseType::Activity,
        ] {
            assert_eq!(ty.as_str().parse::<ExerciseType>().unwrap(), ty);
        }
    }

    #[test]
    fn test_routine_without_description_omits_it() {
        let routine = RoutineView::new(
            RoutineRow {
                id: Uuid::new_v4(),
                name: "Leg Day".to_string(),
                description: None,
            },
            vec![],
        );
        let json = serde_json::to_value(&routine).unwrap();

        assert!(json.get("description").is_none());
        assert_eq!(json["workouts"], serde_json::json!([]));
    }
}
