//! Task event — an ephemeral record of a committed task mutation.
//!
//! Events are produced by the task-mutation flow immediately after a state
//! change commits, handed to the rule pipeline, and dropped. They are never
//! persisted, queued, or retried: if processing fails the event is lost.

use serde::{Deserialize, Serialize};

use crate::id::{ProjectId, TaskId, UserId};

/// The committed change that produced an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskChange {
    /// The task moved to a new status.
    StatusChanged {
        /// The status the task moved *to*, e.g. `"DONE"`.
        status: String,
    },
    /// The task's priority changed.
    PriorityChanged {
        /// The priority the task moved *to*, e.g. `"HIGH"`.
        priority: String,
    },
    /// The task was created.
    Created,
}

impl std::fmt::Display for TaskChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatusChanged { status } => write!(f, "status_changed({status})"),
            Self::PriorityChanged { priority } => write!(f, "priority_changed({priority})"),
            Self::Created => f.write_str("created"),
        }
    }
}

/// A task mutation handed to the rule pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskEvent {
    pub task_id: TaskId,
    pub project_id: ProjectId,
    /// The user whose mutation produced this event. Automation side effects
    /// (comments, assignments) are attributed to this actor.
    pub actor: UserId,
    pub change: TaskChange,
}

impl TaskEvent {
    /// Create a new event.
    #[must_use]
    pub fn new(task_id: TaskId, project_id: ProjectId, actor: UserId, change: TaskChange) -> Self {
        Self {
            task_id,
            project_id,
            actor,
            change,
        }
    }
}
