// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly schedule models.

use crate::models::routine::RoutineView;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use uuid::Uuid;

/// Day of the week a routine is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Canonical day order. Used both to rank `day_schedules.day` in SQL and
/// to lay out the day slots of a [`WeekScheduleView`].
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    /// Name as stored in `day_schedules.day` and sent to clients.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// 1-based rank, Monday = 1.
    pub fn rank(self) -> usize {
        WEEKDAYS
            .iter()
            .position(|d| *d == self)
            .map_or(0, |i| i + 1)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        WEEKDAYS.iter().copied().find(|d| d.name() == name)
    }

    /// All day names in canonical order, bound as a `text[]` query parameter.
    pub fn names() -> Vec<&'static str> {
        WEEKDAYS.iter().map(|d| d.name()).collect()
    }
}

/// One row of the week -> day -> routine join. Routine columns are all
/// `NULL` for days without attachments.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleRow {
    pub day: Option<String>,
    pub routine_id: Option<Uuid>,
    pub routine_name: Option<String>,
    pub routine_description: Option<String>,
}

/// A single day slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "swoleMobile/src/types/generated/")
)]
pub struct DayScheduleView {
    pub day: String,
    pub routines: Vec<RoutineView>,
}

/// A full week. Always holds exactly seven days, Monday first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "swoleMobile/src/types/generated/")
)]
pub struct WeekScheduleView {
    pub schedule: Vec<DayScheduleView>,
}

impl WeekScheduleView {
    /// Seven empty day slots in canonical order.
    pub fn empty() -> Self {
        Self {
            schedule: WEEKDAYS
                .iter()
                .map(|day| DayScheduleView {
                    day: day.name().to_string(),
                    routines: Vec::new(),
                })
                .collect(),
        }
    }

    /// Slot for `day`.
    pub fn day_mut(&mut self, day: Weekday) -> &mut DayScheduleView {
        // Slots are built from WEEKDAYS, so rank - 1 is always in bounds.
        &mut self.schedule[day.rank() - 1]
    }
}

impl Default for WeekScheduleView {
    fn default() -> Self {
        Self::empty()
    }
}
