// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod identity;
pub mod progress;
pub mod routines;
pub mod schedule;

pub use identity::{resolve_reader, resolve_writer, Resolution, Strategy};
pub use progress::{progress_history, record_progress};
pub use routines::{get_routine, list_routines, load_workouts};
pub use schedule::build_week;
