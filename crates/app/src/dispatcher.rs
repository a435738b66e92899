//! Alert dispatcher — turns scan output into outward notifications.
//!
//! Overdue tasks notify individually so each one respects its own
//! cooldown; due-today and due-soon tasks are batched into one
//! notification per kind per poll cycle, preventing a storm when many
//! tasks share a due date.

use taskhub_domain::alert::{AlertKind, TaskAlert};
use taskhub_domain::time::Timestamp;

use crate::cooldown::CooldownGate;
use crate::ports::{Notification, Notifier};

/// Fixed batch tag for due-today notifications.
pub const DUE_TODAY_TAG: &str = "due-today";
/// Fixed batch tag for due-soon notifications.
pub const DUE_SOON_TAG: &str = "due-soon";

/// Dispatches scan results through a [`Notifier`], consulting a
/// [`CooldownGate`] before every emission.
pub struct AlertDispatcher<N> {
    notifier: N,
    cooldown: CooldownGate,
}

impl<N: Notifier> AlertDispatcher<N> {
    /// Create a dispatcher owning its cooldown gate.
    pub fn new(notifier: N, cooldown: CooldownGate) -> Self {
        Self { notifier, cooldown }
    }

    /// Dispatch one poll cycle's alerts at `now`.
    ///
    /// Returns the notifications that actually went out, so callers and
    /// tests can assert on emission without inspecting logs. Suppressed
    /// tags and an unavailable platform produce no observable effect;
    /// delivery failures are logged and swallowed.
    pub async fn dispatch(&self, alerts: &[TaskAlert], now: Timestamp) -> Vec<Notification> {
        if alerts.is_empty() {
            return Vec::new();
        }
        if !self.notifier.is_available().await {
            tracing::debug!("notification platform unavailable, skipping dispatch");
            return Vec::new();
        }

        let mut emitted = Vec::new();

        for alert in alerts.iter().filter(|a| a.kind == AlertKind::Overdue) {
            let tag = format!("overdue-{}", alert.task_id);
            if !self.cooldown.should_notify(&tag, now) {
                continue;
            }
            let notification = Notification {
                title: "Overdue task".to_string(),
                body: alert.title.clone(),
                tag,
            };
            self.send(notification, &mut emitted).await;
        }

        self.dispatch_batch(alerts, AlertKind::DueToday, DUE_TODAY_TAG, "Tasks due today", now, &mut emitted)
            .await;
        self.dispatch_batch(alerts, AlertKind::DueSoon, DUE_SOON_TAG, "Tasks due soon", now, &mut emitted)
            .await;

        emitted
    }

    /// Emit at most one batched notification for a kind.
    async fn dispatch_batch(
        &self,
        alerts: &[TaskAlert],
        kind: AlertKind,
        tag: &str,
        title: &str,
        now: Timestamp,
        emitted: &mut Vec<Notification>,
    ) {
        let titles: Vec<&str> = alerts
            .iter()
            .filter(|a| a.kind == kind)
            .map(|a| a.title.as_str())
            .collect();
        if titles.is_empty() {
            return;
        }
        if !self.cooldown.should_notify(tag, now) {
            return;
        }
        let notification = Notification {
            title: title.to_string(),
            body: titles.join(", "),
            tag: tag.to_string(),
        };
        self.send(notification, emitted).await;
    }

    async fn send(&self, notification: Notification, emitted: &mut Vec<Notification>) {
        match self.notifier.notify(notification.clone()).await {
            Ok(()) => emitted.push(notification),
            Err(err) => {
                tracing::warn!(tag = %notification.tag, error = %err, "notification delivery failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    use chrono::{Duration, TimeZone, Utc};
    use taskhub_domain::id::TaskId;
    use taskhub_domain::task::TaskPriority;

    use crate::ports::NotifyError;

    // ── Spy notifier ───────────────────────────────────────────────

    struct SpyNotifier {
        available: bool,
        fail_sends: bool,
        sent: Mutex<Vec<Notification>>,
    }

    impl Default for SpyNotifier {
        fn default() -> Self {
            Self {
                available: true,
                fail_sends: false,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl Notifier for SpyNotifier {
        fn is_available(&self) -> impl Future<Output = bool> + Send {
            let available = self.available;
            async move { available }
        }

        fn notify(
            &self,
            notification: Notification,
        ) -> impl Future<Output = Result<(), NotifyError>> + Send {
            let result = if self.fail_sends {
                Err(NotifyError::Delivery {
                    reason: "channel closed".to_string(),
                })
            } else {
                self.sent.lock().unwrap().push(notification);
                Ok(())
            };
            async { result }
        }
    }

    // ── Helpers ────────────────────────────────────────────────────

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap()
    }

    fn alert(kind: AlertKind, title: &str) -> TaskAlert {
        TaskAlert {
            task_id: TaskId::new(),
            title: title.to_string(),
            project_name: None,
            due_date: t0(),
            priority: TaskPriority::Medium,
            kind,
        }
    }

    fn dispatcher(notifier: SpyNotifier) -> AlertDispatcher<SpyNotifier> {
        AlertDispatcher::new(notifier, CooldownGate::default())
    }

    // ── Tests ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_emit_one_notification_per_overdue_task() {
        let d = dispatcher(SpyNotifier::default());
        let alerts = vec![
            alert(AlertKind::Overdue, "first"),
            alert(AlertKind::Overdue, "second"),
        ];

        let emitted = d.dispatch(&alerts, t0()).await;

        assert_eq!(emitted.len(), 2);
        assert_eq!(emitted[0].tag, format!("overdue-{}", alerts[0].task_id));
        assert_eq!(emitted[1].tag, format!("overdue-{}", alerts[1].task_id));
        assert_eq!(emitted[0].body, "first");
    }

    #[tokio::test]
    async fn should_batch_due_today_tasks_into_one_notification() {
        let d = dispatcher(SpyNotifier::default());
        let alerts = vec![
            alert(AlertKind::DueToday, "write docs"),
            alert(AlertKind::DueToday, "review PR"),
        ];

        let emitted = d.dispatch(&alerts, t0()).await;

        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].tag, DUE_TODAY_TAG);
        assert_eq!(emitted[0].body, "write docs, review PR");
    }

    #[tokio::test]
    async fn should_use_single_title_for_singleton_batch() {
        let d = dispatcher(SpyNotifier::default());
        let alerts = vec![alert(AlertKind::DueSoon, "plan offsite")];

        let emitted = d.dispatch(&alerts, t0()).await;

        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].tag, DUE_SOON_TAG);
        assert_eq!(emitted[0].body, "plan offsite");
    }

    #[tokio::test]
    async fn should_emit_separate_batches_per_kind() {
        let d = dispatcher(SpyNotifier::default());
        let alerts = vec![
            alert(AlertKind::DueToday, "today"),
            alert(AlertKind::DueSoon, "tomorrow"),
            alert(AlertKind::Overdue, "late"),
        ];

        let emitted = d.dispatch(&alerts, t0()).await;

        assert_eq!(emitted.len(), 3);
        let tags: Vec<&str> = emitted.iter().map(|n| n.tag.as_str()).collect();
        assert!(tags.iter().any(|t| t.starts_with("overdue-")));
        assert!(tags.contains(&DUE_TODAY_TAG));
        assert!(tags.contains(&DUE_SOON_TAG));
    }

    #[tokio::test]
    async fn should_suppress_repeat_notifications_within_cooldown() {
        let d = dispatcher(SpyNotifier::default());
        let alerts = vec![alert(AlertKind::Overdue, "late")];

        let first = d.dispatch(&alerts, t0()).await;
        let second = d.dispatch(&alerts, t0() + Duration::minutes(5)).await;
        let third = d.dispatch(&alerts, t0() + Duration::minutes(31)).await;

        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
        assert_eq!(third.len(), 1);
    }

    #[tokio::test]
    async fn should_cooldown_overdue_tasks_independently() {
        let d = dispatcher(SpyNotifier::default());
        let first = vec![alert(AlertKind::Overdue, "late one")];
        let second = vec![alert(AlertKind::Overdue, "late two")];

        assert_eq!(d.dispatch(&first, t0()).await.len(), 1);
        // A different overdue task gets its own tag and is not suppressed
        // by the first task's cooldown.
        assert_eq!(
            d.dispatch(&second, t0() + Duration::minutes(5)).await.len(),
            1
        );
    }

    #[tokio::test]
    async fn should_skip_dispatch_when_platform_unavailable() {
        let d = dispatcher(SpyNotifier {
            available: false,
            ..SpyNotifier::default()
        });
        let alerts = vec![alert(AlertKind::Overdue, "late")];

        let emitted = d.dispatch(&alerts, t0()).await;

        assert!(emitted.is_empty());
        assert!(d.notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_swallow_delivery_failures() {
        let d = dispatcher(SpyNotifier {
            fail_sends: true,
            ..SpyNotifier::default()
        });
        let alerts = vec![alert(AlertKind::Overdue, "late")];

        let emitted = d.dispatch(&alerts, t0()).await;
        assert!(emitted.is_empty());
    }

    #[tokio::test]
    async fn should_do_nothing_for_an_empty_scan() {
        let d = dispatcher(SpyNotifier::default());
        let emitted = d.dispatch(&[], t0()).await;
        assert!(emitted.is_empty());
        assert!(d.notifier.sent.lock().unwrap().is_empty());
    }
}
