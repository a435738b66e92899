//! Cooldown gate — per-tag, time-windowed notification suppression.
//!
//! The gate is the sole idempotency mechanism preventing repeated
//! notifications for a condition that stays true across consecutive poll
//! cycles. It is process-local and volatile: a restart clears every
//! cooldown, which is an accepted tradeoff for simplicity.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use chrono::Duration;

use taskhub_domain::time::Timestamp;

/// Suppression cache mapping alert tags to their last-notified instant.
///
/// One gate is owned per running poll loop (constructor-injected, never
/// global), so tests can build independent instances with controlled
/// clocks. Entries are never evicted within a session.
#[derive(Debug)]
pub struct CooldownGate {
    window: Duration,
    last_notified: Mutex<HashMap<String, Timestamp>>,
}

impl CooldownGate {
    /// Create a gate with the given suppression window.
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_notified: Mutex::new(HashMap::new()),
        }
    }

    /// The configured suppression window.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether a notification for `tag` may go out at `now`.
    ///
    /// Returns `true` iff the tag has never been recorded or its last
    /// record is more than the window before `now` — and records `now`
    /// against the tag in that case. A tag is only updated when the
    /// caller is actually going to emit.
    pub fn should_notify(&self, tag: &str, now: Timestamp) -> bool {
        let mut last_notified = self
            .last_notified
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match last_notified.get(tag) {
            Some(&recorded) if now.signed_duration_since(recorded) <= self.window => false,
            _ => {
                last_notified.insert(tag.to_string(), now);
                true
            }
        }
    }
}

impl Default for CooldownGate {
    /// A gate with the product default window of 30 minutes.
    fn default() -> Self {
        Self::new(Duration::minutes(30))
    }
}
