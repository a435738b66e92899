//! Action — the side effect executed when a rule fires.

use serde::{Deserialize, Serialize};

use crate::id::UserId;

/// Prefix stamped onto every automation-authored comment so readers can
/// tell rule output from human discussion.
pub const AUTOMATION_MARKER: &str = "\u{1f916} Automation: ";

/// The operation performed against the triggering task when a rule fires.
///
/// A closed set: adding an action kind means adding a variant here and a
/// matching executor branch, with exhaustiveness checked at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Post a comment on the task, authored by the event's actor and
    /// prefixed with [`AUTOMATION_MARKER`].
    AddComment { body: String },
    /// Add a user to the task's assignees. Idempotent: an existing
    /// assignment is not an error.
    AssignUser { user_id: UserId },
    /// Move the task to the terminal `ARCHIVED` status, regardless of its
    /// current state.
    ArchiveTask,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AddComment { .. } => f.write_str("add_comment"),
            Self::AssignUser { user_id } => write!(f, "assign_user({user_id})"),
            Self::ArchiveTask => f.write_str("archive_task"),
        }
    }
}
