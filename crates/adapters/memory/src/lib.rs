//! # taskhub-adapter-memory
//!
//! Process-local implementation of the engine's storage ports, backing
//! demos and integration tests with plain maps. The real product keeps
//! rules and tasks in its persistent store; this adapter mirrors that
//! store's observable contract, including the uniqueness constraint on
//! assignments.
//!
//! ## Dependency rule
//!
//! Depends on `taskhub-app` (port traits) and `taskhub-domain` only.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use taskhub_app::ports::{Directory, RuleRepository, TaskStore};
use taskhub_domain::error::{ConflictError, NotFoundError, TaskHubError};
use taskhub_domain::id::{OrganizationId, ProjectId, RuleId, TaskId, UserId};
use taskhub_domain::rule::AutomationRule;
use taskhub_domain::task::{Task, TaskStatus};
use taskhub_domain::time::Timestamp;

/// A comment captured by the store.
#[derive(Debug, Clone)]
pub struct Comment {
    pub task_id: TaskId,
    pub author: UserId,
    pub body: String,
}

/// In-memory rules, tasks, memberships, and comments behind one handle.
///
/// Wrap in an [`Arc`](std::sync::Arc) to share between the rule engine
/// and the alert scanner; every port trait is also implemented for
/// `Arc<MemoryStore>`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rules: Mutex<HashMap<RuleId, AutomationRule>>,
    tasks: Mutex<HashMap<TaskId, Task>>,
    memberships: Mutex<HashMap<UserId, OrganizationId>>,
    comments: Mutex<Vec<Comment>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a rule.
    pub fn insert_rule(&self, rule: AutomationRule) {
        self.lock_rules().insert(rule.id, rule);
    }

    /// Seed a task.
    pub fn insert_task(&self, task: Task) {
        self.lock_tasks().insert(task.id, task);
    }

    /// Record a user's organization membership.
    pub fn insert_member(&self, user: UserId, organization: OrganizationId) {
        self.memberships
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user, organization);
    }

    /// Fetch a task by id.
    #[must_use]
    pub fn get_task(&self, id: TaskId) -> Option<Task> {
        self.lock_tasks().get(&id).cloned()
    }

    /// All comments on a task, in insertion order.
    #[must_use]
    pub fn comments_for(&self, task_id: TaskId) -> Vec<Comment> {
        self.comments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect()
    }

    fn lock_rules(&self) -> std::sync::MutexGuard<'_, HashMap<RuleId, AutomationRule>> {
        self.rules.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_tasks(&self) -> std::sync::MutexGuard<'_, HashMap<TaskId, Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RuleRepository for MemoryStore {
    fn list_active(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, TaskHubError>> + Send {
        let result: Vec<AutomationRule> = self
            .lock_rules()
            .values()
            .filter(|r| r.enabled && r.project_id == project_id)
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

impl TaskStore for MemoryStore {
    fn add_comment(
        &self,
        task_id: TaskId,
        author: UserId,
        body: String,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        let result = if self.lock_tasks().contains_key(&task_id) {
            self.comments
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(Comment {
                    task_id,
                    author,
                    body,
                });
            Ok(())
        } else {
            Err(NotFoundError {
                entity: "Task",
                id: task_id.to_string(),
            }
            .into())
        };
        async { result }
    }

    fn assign_user(
        &self,
        task_id: TaskId,
        user_id: UserId,
    ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        let mut tasks = self.lock_tasks();
        let result = match tasks.get_mut(&task_id) {
            Some(task) if task.assignees.contains(&user_id) => Err(ConflictError {
                entity: "Assignment",
                id: format!("{task_id}/{user_id}"),
            }
            .into()),
            Some(task) => {
                task.assignees.push(user_id);
                Ok(())
            }
            None => Err(NotFoundError {
                entity: "Task",
                id: task_id.to_string(),
            }
            .into()),
        };
        drop(tasks);
        async { result }
    }

    fn archive(&self, task_id: TaskId) -> impl Future<Output = Result<(), TaskHubError>> + Send {
        let mut tasks = self.lock_tasks();
        let result = match tasks.get_mut(&task_id) {
            Some(task) => {
                task.status = TaskStatus::Archived;
                Ok(())
            }
            None => Err(NotFoundError {
                entity: "Task",
                id: task_id.to_string(),
            }
            .into()),
        };
        drop(tasks);
        async { result }
    }

    fn find_due_before(
        &self,
        organization_id: OrganizationId,
        cutoff: Timestamp,
    ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send {
        let result: Vec<Task> = self
            .lock_tasks()
            .values()
            .filter(|t| t.organization_id == organization_id)
            .filter(|t| !t.status.is_terminal())
            .filter(|t| t.due_date.is_some_and(|due| due <= cutoff))
            .cloned()
            .collect();
        async { Ok(result) }
    }
}

impl Directory for MemoryStore {
    fn organization_of(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Option<OrganizationId>, TaskHubError>> + Send {
        let result = self
            .memberships
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user)
            .copied();
        async move { Ok(result) }
    }
}
