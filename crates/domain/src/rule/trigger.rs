//! Trigger — the task change pattern that fires a rule.

use serde::{Deserialize, Serialize};

use crate::event::TaskChange;

/// Describes which task mutation should fire an automation rule.
///
/// Matching is by exact, case-sensitive string equality on the payload;
/// a rule watching `"DONE"` does not fire for `"done"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// Fires when a task transitions to the given status.
    StatusChanged { status: String },
    /// Fires when a task's priority changes to the given value.
    PriorityChanged { priority: String },
    /// Fires when a task is created in the rule's project.
    TaskCreated,
}

impl Trigger {
    /// Check whether this trigger matches a committed task change.
    #[must_use]
    pub fn matches(&self, change: &TaskChange) -> bool {
        match (self, change) {
            (Self::StatusChanged { status }, TaskChange::StatusChanged { status: actual }) => {
                status == actual
            }
            (
                Self::PriorityChanged { priority },
                TaskChange::PriorityChanged { priority: actual },
            ) => priority == actual,
            (Self::TaskCreated, TaskChange::Created) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusChanged { status } => write!(f, "status_changed({status})"),
            Self::PriorityChanged { priority } => write!(f, "priority_changed({priority})"),
            Self::TaskCreated => f.write_str("task_created"),
        }
    }
}
