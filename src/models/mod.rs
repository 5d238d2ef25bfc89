// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod progress;
pub mod routine;
pub mod schedule;
pub mod user;

pub use progress::{ProgressEntry, ProgressUpdate};
pub use routine::{ExerciseType, RoutineView, WorkoutView};
pub use schedule::{DayScheduleView, WeekScheduleView, Weekday, WEEKDAYS};
pub use user::UserId;
