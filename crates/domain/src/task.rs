//! Task — the read-model the engine observes and mutates.
//!
//! Task CRUD itself lives in the surrounding application; the engine only
//! needs the fields that rule actions and due-date scans touch.

use serde::{Deserialize, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::{OrganizationId, ProjectId, TaskId, UserId};
use crate::time::Timestamp;

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Archived,
}

impl TaskStatus {
    /// Whether the task has reached a terminal state.
    ///
    /// Terminal tasks are excluded from due-date scans: a finished or
    /// archived task can no longer become overdue.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Archived)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::Archived => "ARCHIVED",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            "ARCHIVED" => Ok(Self::Archived),
            other => Err(format!("unknown task status: {other}")),
        }
    }
}

/// Priority of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        };
        f.write_str(s)
    }
}

/// A task as seen by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub organization_id: OrganizationId,
    pub title: String,
    /// Denormalized project name, carried into alerts when present.
    pub project_name: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
    pub assignees: Vec<UserId>,
}

impl Task {
    /// Create a builder for constructing a [`Task`].
    #[must_use]
    pub fn builder() -> TaskBuilder {
        TaskBuilder::default()
    }

    /// Whether the task's alerts should reach the given user.
    ///
    /// Unassigned tasks are broadcast to everyone in the organization;
    /// assigned tasks are private to their assignees.
    #[must_use]
    pub fn is_visible_to(&self, user: UserId) -> bool {
        self.assignees.is_empty() || self.assignees.contains(&user)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when `title` is empty
    /// ([`ValidationError::EmptyTitle`]).
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Task`].
#[derive(Debug, Default)]
pub struct TaskBuilder {
    id: Option<TaskId>,
    project_id: Option<ProjectId>,
    organization_id: Option<OrganizationId>,
    title: Option<String>,
    project_name: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<Timestamp>,
    assignees: Vec<UserId>,
}

impl TaskBuilder {
    #[must_use]
    pub fn id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn project_id(mut self, id: ProjectId) -> Self {
        self.project_id = Some(id);
        self
    }

    #[must_use]
    pub fn organization_id(mut self, id: OrganizationId) -> Self {
        self.organization_id = Some(id);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn due_date(mut self, due: Timestamp) -> Self {
        self.due_date = Some(due);
        self
    }

    #[must_use]
    pub fn assignee(mut self, user: UserId) -> Self {
        self.assignees.push(user);
        self
    }

    /// Consume the builder, validate, and return a [`Task`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if required fields are missing or empty.
    pub fn build(self) -> Result<Task, TaskHubError> {
        let task = Task {
            id: self.id.unwrap_or_default(),
            project_id: self.project_id.unwrap_or_default(),
            organization_id: self.organization_id.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            project_name: self.project_name,
            status: self.status.unwrap_or(TaskStatus::Todo),
            priority: self.priority.unwrap_or(TaskPriority::Medium),
            due_date: self.due_date,
            assignees: self.assignees,
        };
        task.validate()?;
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_task() -> Task {
        Task::builder().title("Write release notes").build().unwrap()
    }

    #[test]
    fn should_build_valid_task_with_defaults() {
        let task = valid_task();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.due_date.is_none());
        assert!(task.assignees.is_empty());
    }

    #[test]
    fn should_return_validation_error_when_title_is_empty() {
        let result = Task::builder().build();
        assert!(matches!(
            result,
            Err(TaskHubError::Validation(ValidationError::EmptyTitle))
        ));
    }

    #[test]
    fn should_treat_done_and_archived_as_terminal() {
        assert!(TaskStatus::Done.is_terminal());
        assert!(TaskStatus::Archived.is_terminal());
        assert!(!TaskStatus::Todo.is_terminal());
        assert!(!TaskStatus::InProgress.is_terminal());
    }

    #[test]
    fn should_broadcast_unassigned_task_to_any_user() {
        let task = valid_task();
        assert!(task.is_visible_to(UserId::new()));
    }

    #[test]
    fn should_restrict_assigned_task_to_assignees() {
        let assignee = UserId::new();
        let stranger = UserId::new();
        let task = Task::builder()
            .title("Private work")
            .assignee(assignee)
            .build()
            .unwrap();
        assert!(task.is_visible_to(assignee));
        assert!(!task.is_visible_to(stranger));
    }

    #[test]
    fn should_roundtrip_status_through_display_and_from_str() {
        for status in [
            TaskStatus::Todo,
            TaskStatus::InProgress,
            TaskStatus::Done,
            TaskStatus::Archived,
        ] {
            let parsed: TaskStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn should_return_error_when_parsing_unknown_status() {
        let result: Result<TaskStatus, _> = "SHIPPED".parse();
        assert!(result.is_err());
    }

    #[test]
    fn should_order_priorities_low_to_urgent() {
        assert!(TaskPriority::Low < TaskPriority::Medium);
        assert!(TaskPriority::Medium < TaskPriority::High);
        assert!(TaskPriority::High < TaskPriority::Urgent);
    }

    #[test]
    fn should_roundtrip_task_through_serde_json() {
        let task = Task::builder()
            .title("Serde check")
            .project_name("Docs")
            .status(TaskStatus::InProgress)
            .priority(TaskPriority::High)
            .assignee(UserId::new())
            .build()
            .unwrap();
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, task.id);
        assert_eq!(parsed.title, task.title);
        assert_eq!(parsed.status, task.status);
        assert_eq!(parsed.assignees, task.assignees);
    }
}
