//! Poll loop — the timer driving scan-and-dispatch cycles.
//!
//! A single cooperative task, distinct from request handling: each firing
//! performs one full cycle before the next firing is scheduled, and a
//! slow scan simply delays the next firing. Stopping the loop cancels the
//! timer without leaving a dangling scheduled firing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use taskhub_domain::id::UserId;

use crate::alert_scanner::AlertScanner;
use crate::clock::Clock;
use crate::dispatcher::AlertDispatcher;
use crate::ports::{Directory, Notification, Notifier, TaskStore};

/// Default period between poll cycles.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// One scan-then-dispatch unit, directly callable for deterministic
/// tests and driven on a timer by [`PollLoop`] in production.
pub struct AlertPipeline<T, D, C, N> {
    scanner: AlertScanner<T, D, C>,
    dispatcher: AlertDispatcher<N>,
}

impl<T, D, C, N> AlertPipeline<T, D, C, N>
where
    T: TaskStore,
    D: Directory,
    C: Clock,
    N: Notifier,
{
    /// Create a pipeline from its two halves.
    pub fn new(scanner: AlertScanner<T, D, C>, dispatcher: AlertDispatcher<N>) -> Self {
        Self {
            scanner,
            dispatcher,
        }
    }

    /// Run one poll cycle for `user`: scan, then dispatch at the
    /// scanner's current instant. Never errors; a failed scan dispatches
    /// nothing.
    pub async fn run_cycle(&self, user: UserId) -> Vec<Notification> {
        let alerts = self.scanner.get_alerts(user).await;
        self.dispatcher.dispatch(&alerts, self.scanner.now()).await
    }
}

/// Handle to a running poll loop.
///
/// Start once when the alerting surface mounts; [`stop`](Self::stop) on
/// teardown.
pub struct PollLoop {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PollLoop {
    /// Spawn the timer task. The first cycle runs immediately on start,
    /// then once per `period`.
    pub fn start<T, D, C, N>(
        pipeline: Arc<AlertPipeline<T, D, C, N>>,
        user: UserId,
        period: Duration,
    ) -> Self
    where
        T: TaskStore + Send + Sync + 'static,
        D: Directory + Send + Sync + 'static,
        C: Clock + 'static,
        N: Notifier + Send + Sync + 'static,
    {
        let (shutdown, mut rx) = watch::channel(false);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // A slow cycle delays the next firing instead of stacking
            // missed ticks into a burst.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let emitted = pipeline.run_cycle(user).await;
                        tracing::debug!(user = %user, emitted = emitted.len(), "poll cycle complete");
                    }
                    changed = rx.changed() => {
                        if changed.is_err() || *rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });
        Self { shutdown, handle }
    }

    /// Stop the timer and wait for the loop task to finish. An in-flight
    /// cycle completes; no further firing is scheduled.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.handle.await;
    }
}
