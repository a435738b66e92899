//! Alert — due-date classification of tasks at a point in time.
//!
//! Alerts are derived on every scan and never persisted. Classification
//! uses three time bands anchored on the scanning process's **local**
//! calendar day; the local/UTC ambiguity for multi-tenant deployments is
//! a known product limitation, kept as-is on purpose.

use chrono::{Duration, Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::TaskId;
use crate::task::TaskPriority;
use crate::time::Timestamp;

/// Which due-date band a task fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Due date is strictly in the past.
    Overdue,
    /// Due within the current local calendar day.
    DueToday,
    /// Due within the next local calendar day.
    DueSoon,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Overdue => "overdue",
            Self::DueToday => "due_today",
            Self::DueSoon => "due_soon",
        };
        f.write_str(s)
    }
}

/// A single task's alert, as surfaced to the dispatcher and the in-app
/// advisory list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAlert {
    pub task_id: TaskId,
    pub title: String,
    pub project_name: Option<String>,
    pub due_date: Timestamp,
    pub priority: TaskPriority,
    pub kind: AlertKind,
}

/// Boundary instants of the classification bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    /// Local midnight at the start of the current day.
    pub today_start: Timestamp,
    /// `today_start + 24h`.
    pub today_end: Timestamp,
    /// `today_end + 24h`.
    pub tomorrow_end: Timestamp,
}

impl DayBounds {
    /// Build bounds from an explicit day start. Classification is pure
    /// given these instants, so tests pin them instead of the host clock.
    #[must_use]
    pub fn from_start(today_start: Timestamp) -> Self {
        let today_end = today_start + Duration::hours(24);
        Self {
            today_start,
            today_end,
            tomorrow_end: today_end + Duration::hours(24),
        }
    }

    /// Build bounds around `now` using the process's local calendar day.
    ///
    /// If local midnight does not exist (DST gap), falls back to the UTC
    /// midnight of the same instant.
    #[must_use]
    pub fn local(now: Timestamp) -> Self {
        let midnight = now
            .with_timezone(&Local)
            .date_naive()
            .and_time(NaiveTime::MIN);
        let today_start = midnight.and_local_timezone(Local).earliest().map_or_else(
            || now.date_naive().and_time(NaiveTime::MIN).and_utc(),
            |local| local.with_timezone(&Utc),
        );
        Self::from_start(today_start)
    }
}

/// Classify a due date against `now` and the day bounds.
///
/// The bands are mutually exclusive and checked in priority order: a past
/// due date is always `Overdue`, even when it also lies inside the
/// current day. Dates beyond `tomorrow_end` are unclassified.
#[must_use]
pub fn classify(due: Timestamp, now: Timestamp, bounds: &DayBounds) -> Option<AlertKind> {
    if due < now {
        return Some(AlertKind::Overdue);
    }
    if due >= bounds.today_start && due < bounds.today_end {
        return Some(AlertKind::DueToday);
    }
    if due >= bounds.today_end && due < bounds.tomorrow_end {
        return Some(AlertKind::DueSoon);
    }
    None
}
