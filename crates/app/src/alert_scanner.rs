//! Alert scanner — due-date scans with visibility filtering.
//!
//! Computes, for one tenant and one point in time, the set of tasks
//! crossing due-date thresholds. Results are recomputed on every scan and
//! never persisted.

use chrono::Duration;

use taskhub_domain::alert::{DayBounds, TaskAlert, classify};
use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{OrganizationId, UserId};
use taskhub_domain::time::Timestamp;

use crate::clock::Clock;
use crate::ports::{Directory, TaskStore};

/// Scans a tenant's tasks for due-date conditions.
pub struct AlertScanner<T, D, C> {
    tasks: T,
    directory: D,
    clock: C,
}

impl<T, D, C> AlertScanner<T, D, C>
where
    T: TaskStore,
    D: Directory,
    C: Clock,
{
    /// Create a new scanner.
    pub fn new(tasks: T, directory: D, clock: C) -> Self {
        Self {
            tasks,
            directory,
            clock,
        }
    }

    /// The scanner's current instant. The poll loop uses the scanner's
    /// clock as its single time source.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    /// Alerts visible to `user`, scoped to the user's organization.
    ///
    /// This is the externally visible scan entry point and never errors:
    /// an unknown user, a failed tenant lookup, or a failed task query all
    /// degrade to an empty list with a log line.
    #[tracing::instrument(skip(self))]
    pub async fn get_alerts(&self, user: UserId) -> Vec<TaskAlert> {
        let organization = match self.directory.organization_of(user).await {
            Ok(Some(organization)) => organization,
            Ok(None) => {
                tracing::debug!(user = %user, "no organization for user, skipping scan");
                return Vec::new();
            }
            Err(err) => {
                tracing::warn!(user = %user, error = %err, "tenant lookup failed, skipping scan");
                return Vec::new();
            }
        };

        let now = self.clock.now();
        match self.scan(organization, user, now).await {
            Ok(alerts) => alerts,
            Err(err) => {
                tracing::warn!(user = %user, error = %err, "alert scan failed, returning no alerts");
                Vec::new()
            }
        }
    }

    /// Scan one organization at `now`, classifying against the process's
    /// local calendar day.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the candidate query fails.
    pub async fn scan(
        &self,
        organization: OrganizationId,
        user: UserId,
        now: Timestamp,
    ) -> Result<Vec<TaskAlert>, TaskHubError> {
        self.scan_with_bounds(organization, user, now, &DayBounds::local(now))
            .await
    }

    /// Scan with explicit day bounds. Classification is pure given the
    /// bounds, so tests pin them instead of the host timezone.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the candidate query fails.
    pub async fn scan_with_bounds(
        &self,
        organization: OrganizationId,
        user: UserId,
        now: Timestamp,
        bounds: &DayBounds,
    ) -> Result<Vec<TaskAlert>, TaskHubError> {
        let cutoff = now + Duration::hours(24);
        let candidates = self.tasks.find_due_before(organization, cutoff).await?;

        let mut alerts: Vec<TaskAlert> = candidates
            .into_iter()
            .filter(|task| task.is_visible_to(user))
            .filter_map(|task| {
                let due_date = task.due_date?;
                let kind = classify(due_date, now, bounds)?;
                Some(TaskAlert {
                    task_id: task.id,
                    title: task.title,
                    project_name: task.project_name,
                    due_date,
                    priority: task.priority,
                    kind,
                })
            })
            .collect();
        alerts.sort_by_key(|alert| alert.due_date);
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;

    use chrono::{TimeZone, Utc};
    use taskhub_domain::alert::AlertKind;
    use taskhub_domain::error::StorageError;
    use taskhub_domain::id::TaskId;
    use taskhub_domain::task::{Task, TaskPriority, TaskStatus};

    use crate::clock::ManualClock;

    // ── In-memory task store ───────────────────────────────────────

    struct InMemoryTaskStore {
        tasks: Vec<Task>,
        fail: bool,
    }

    impl InMemoryTaskStore {
        fn with(tasks: Vec<Task>) -> Self {
            Self { tasks, fail: false }
        }

        fn failing() -> Self {
            Self {
                tasks: Vec::new(),
                fail: true,
            }
        }
    }

    impl TaskStore for InMemoryTaskStore {
        fn add_comment(
            &self,
            _task_id: TaskId,
            _author: UserId,
            _body: String,
        ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
            async { Ok(()) }
        }

        fn assign_user(
            &self,
            _task_id: TaskId,
            _user_id: UserId,
        ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
            async { Ok(()) }
        }

        fn archive(
            &self,
            _task_id: TaskId,
        ) -> impl Future<Output = Result<(), TaskHubError>> + Send {
            async { Ok(()) }
        }

        fn find_due_before(
            &self,
            organization_id: OrganizationId,
            cutoff: Timestamp,
        ) -> impl Future<Output = Result<Vec<Task>, TaskHubError>> + Send {
            let result = if self.fail {
                Err(StorageError::new("task query failed").into())
            } else {
                Ok(self
                    .tasks
                    .iter()
                    .filter(|t| t.organization_id == organization_id)
                    .filter(|t| !t.status.is_terminal())
                    .filter(|t| t.due_date.is_some_and(|due| due <= cutoff))
                    .cloned()
                    .collect())
            };
            async { result }
        }
    }

    // ── In-memory directory ────────────────────────────────────────

    struct InMemoryDirectory {
        memberships: Vec<(UserId, OrganizationId)>,
        fail: bool,
    }

    impl InMemoryDirectory {
        fn with(memberships: Vec<(UserId, OrganizationId)>) -> Self {
            Self {
                memberships,
                fail: false,
            }
        }
    }

    impl Directory for InMemoryDirectory {
        fn organization_of(
            &self,
            user: UserId,
        ) -> impl Future<Output = Result<Option<OrganizationId>, TaskHubError>> + Send {
            let result = if self.fail {
                Err(StorageError::new("directory lookup failed").into())
            } else {
                Ok(self
                    .memberships
                    .iter()
                    .find(|(u, _)| *u == user)
                    .map(|(_, org)| *org))
            };
            async { result }
        }
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn at(day: u32, hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
    }

    fn fixture_now() -> Timestamp {
        at(10, 10)
    }

    fn fixture_bounds() -> DayBounds {
        DayBounds::from_start(at(10, 0))
    }

    fn due_task(org: OrganizationId, title: &str, due: Timestamp) -> Task {
        Task::builder()
            .organization_id(org)
            .title(title)
            .priority(TaskPriority::High)
            .due_date(due)
            .build()
            .unwrap()
    }

    fn scanner_with(
        tasks: Vec<Task>,
        memberships: Vec<(UserId, OrganizationId)>,
        now: Timestamp,
    ) -> AlertScanner<InMemoryTaskStore, InMemoryDirectory, ManualClock> {
        AlertScanner::new(
            InMemoryTaskStore::with(tasks),
            InMemoryDirectory::with(memberships),
            ManualClock::fixed(now),
        )
    }

    // ── Tests ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_classify_candidates_into_bands() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let tasks = vec![
            due_task(org, "yesterday", at(9, 9)),
            due_task(org, "this afternoon", at(10, 15)),
            due_task(org, "tomorrow morning", at(11, 8)),
        ];
        let scanner = scanner_with(tasks, vec![(user, org)], fixture_now());

        let alerts = scanner
            .scan_with_bounds(org, user, fixture_now(), &fixture_bounds())
            .await
            .unwrap();

        assert_eq!(alerts.len(), 3);
        assert_eq!(alerts[0].kind, AlertKind::Overdue);
        assert_eq!(alerts[1].kind, AlertKind::DueToday);
        assert_eq!(alerts[2].kind, AlertKind::DueSoon);
    }

    #[tokio::test]
    async fn should_exclude_tasks_due_beyond_the_scan_window() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let tasks = vec![due_task(org, "far future", at(13, 0))];
        let scanner = scanner_with(tasks, vec![(user, org)], fixture_now());

        let alerts = scanner
            .scan_with_bounds(org, user, fixture_now(), &fixture_bounds())
            .await
            .unwrap();
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn should_order_alerts_by_due_date() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let tasks = vec![
            due_task(org, "later", at(9, 9)),
            due_task(org, "earlier", at(8, 9)),
        ];
        let scanner = scanner_with(tasks, vec![(user, org)], fixture_now());

        let alerts = scanner
            .scan_with_bounds(org, user, fixture_now(), &fixture_bounds())
            .await
            .unwrap();
        assert_eq!(alerts[0].title, "earlier");
        assert_eq!(alerts[1].title, "later");
    }

    #[tokio::test]
    async fn should_broadcast_unassigned_tasks_to_any_user() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let tasks = vec![due_task(org, "unassigned", at(9, 9))];
        let scanner = scanner_with(tasks, vec![(user, org)], fixture_now());

        let alerts = scanner.get_alerts(user).await;
        assert_eq!(alerts.len(), 1);
    }

    #[tokio::test]
    async fn should_hide_tasks_assigned_to_someone_else() {
        let org = OrganizationId::new();
        let user_a = UserId::new();
        let user_b = UserId::new();
        let task = Task::builder()
            .organization_id(org)
            .title("private to B")
            .due_date(at(9, 9))
            .assignee(user_b)
            .build()
            .unwrap();
        let scanner = scanner_with(
            vec![task],
            vec![(user_a, org), (user_b, org)],
            fixture_now(),
        );

        assert!(scanner.get_alerts(user_a).await.is_empty());
        assert_eq!(scanner.get_alerts(user_b).await.len(), 1);
    }

    #[tokio::test]
    async fn should_exclude_terminal_tasks_from_scans() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let mut done = due_task(org, "finished", at(9, 9));
        done.status = TaskStatus::Done;
        let mut archived = due_task(org, "archived", at(9, 9));
        archived.status = TaskStatus::Archived;
        let scanner = scanner_with(vec![done, archived], vec![(user, org)], fixture_now());

        let alerts = scanner.get_alerts(user).await;
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn should_return_empty_for_unknown_user() {
        let org = OrganizationId::new();
        let tasks = vec![due_task(org, "orphan scan", at(9, 9))];
        let scanner = scanner_with(tasks, vec![], fixture_now());

        let alerts = scanner.get_alerts(UserId::new()).await;
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn should_degrade_to_empty_when_task_query_fails() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let scanner = AlertScanner::new(
            InMemoryTaskStore::failing(),
            InMemoryDirectory::with(vec![(user, org)]),
            ManualClock::fixed(fixture_now()),
        );

        let alerts = scanner.get_alerts(user).await;
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn should_degrade_to_empty_when_tenant_lookup_fails() {
        let org = OrganizationId::new();
        let user = UserId::new();
        let scanner = AlertScanner::new(
            InMemoryTaskStore::with(vec![due_task(org, "unreachable", at(9, 9))]),
            InMemoryDirectory {
                memberships: vec![(user, org)],
                fail: true,
            },
            ManualClock::fixed(fixture_now()),
        );

        let alerts = scanner.get_alerts(user).await;
        assert!(alerts.is_empty());
    }

    #[tokio::test]
    async fn should_not_leak_tasks_across_organizations() {
        let org_a = OrganizationId::new();
        let org_b = OrganizationId::new();
        let user = UserId::new();
        let tasks = vec![
            due_task(org_a, "mine", at(9, 9)),
            due_task(org_b, "other tenant", at(9, 9)),
        ];
        let scanner = scanner_with(tasks, vec![(user, org_a)], fixture_now());

        let alerts = scanner.get_alerts(user).await;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].title, "mine");
    }
}
