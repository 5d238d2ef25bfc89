//! Recorded workout progress.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// `user_progress` row as read back for history listings.
#[derive(Debug, Clone, FromRow)]
pub struct ProgressRow {
    pub weight: Option<f64>,
    pub time: Option<i32>,
    pub date: NaiveDate,
}

/// One day of recorded progress for a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "swoleMobile/src/types/generated/")
)]
pub struct ProgressEntry {
    /// ISO date, `YYYY-MM-DD`
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<i32>,
}

/// Request body for recording today's progress on a workout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressUpdate {
    /// Email or user id. Required.
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default, rename = "userWeight")]
    pub user_weight: Option<f64>,
    #[serde(default, rename = "userTime")]
    pub user_time: Option<i32>,
}
