// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weekly schedule assembly.

use crate::db::Database;
use crate::error::Result;
use crate::models::routine::RoutineRow;
use crate::models::schedule::ScheduleRow;
use crate::models::{RoutineView, WeekScheduleView, Weekday};
use crate::services::identity;
use crate::services::routines::{load_workouts, MAX_CONCURRENT_ROUTINE_LOADS};
use futures_util::{stream, StreamExt};

/// Build the seven-day schedule for the (leniently) resolved user.
///
/// All seven days are present even when nothing is scheduled. Each
/// attached routine carries its workouts with today's progress.
pub async fn build_week(db: &Database, identifier: Option<&str>) -> Result<WeekScheduleView> {
    let user_id = identity::resolve_reader(db, identifier).await?;
    let rows = db.schedule_rows(user_id).await?;
    let placements = placements(rows);

    tracing::debug!(
        user_id = ?user_id,
        routines = placements.len(),
        "Assembling week schedule"
    );

    let expanded: Vec<(Weekday, RoutineView)> = stream::iter(placements)
        .map(|(day, routine)| async move {
            let workouts = load_workouts(db, routine.id, user_id).await;
            (day, RoutineView::new(routine, workouts))
        })
        .buffered(MAX_CONCURRENT_ROUTINE_LOADS)
        .collect()
        .await;

    let mut week = WeekScheduleView::empty();
    for (day, routine) in expanded {
        week.day_mut(day).routines.push(routine);
    }
    Ok(week)
}

/// Turn join rows into (day, routine) attachments, keeping row order.
///
/// Days without routines come back with null routine columns and are
/// dropped, as are rows naming an unknown day.
fn placements(rows: Vec<ScheduleRow>) -> Vec<(Weekday, RoutineRow)> {
    rows.into_iter()
        .filter_map(|row| {
            let day_name = row.day?;
            let routine_id = row.routine_id?;
            let Some(day) = Weekday::from_name(&day_name) else {
                tracing::warn!(day = %day_name, %routine_id, "Skipping routine on unknown day");
                return None;
            };
            Some((
                day,
                RoutineRow {
                    id: routine_id,
                    name: row.routine_name.unwrap_or_default(),
                    description: row.routine_description,
                },
            ))
        })
        .collect()
}
