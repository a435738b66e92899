//! Task store port — the engine's reads and writes against tasks.
//!
//! The surrounding application owns task CRUD; this port exposes only the
//! operations rule actions and due-date scans need.

use std::future::Future;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{OrganizationId, TaskId, UserId};
use taskhub_domain::task::Task;
use taskhub_domain::time::Timestamp;

/// Engine-facing task access.
pub trait TaskStore {
    /// Create a comment on a task.
    fn add_comment(
        &self,
        task_id: TaskId,
        author: UserId,
        body: String,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send;

    /// Add a user to a task's assignees.
    ///
    /// An already existing assignment surfaces as
    /// [`TaskHubError::Conflict`]; callers decide whether that is an error.
    fn assign_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send;

    /// Move a task to the terminal `ARCHIVED` status, unconditionally.
    fn archive(&self, task_id: TaskId) -> impl Future<Output = Result<(), TaskHubError>> + Send;

    /// Non-terminal tasks in an organization with a due date at or before
    /// `cutoff`.
    fn find_due_before(
        &self,
        organization_id: OrganizationId,
        cutoff: Timestamp,
    ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send;
}

impl<T: TaskStore + Send + Sync> TaskStore for std::sync::Arc<T> {
    fn add_comment(
        &self,
        task_id: TaskId,
        author: UserId,
        body: String,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        (**self).add_comment(task_id, author, body)
    }

    fn assign_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        (**self).assign_user(task_id, user_id)
    }

    fn archive(&self, task_id: TaskId) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        (**self).archive(task_id)
    }

    fn find_due_before(
        &self,
        organization_id: OrganizationId,
        cutoff: Timestamp,
    ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send {
        (**self).find_due_before(organization_id, cutoff)
    }
}
