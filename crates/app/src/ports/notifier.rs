//! Notifier port — outward notification delivery.
//!
//! The engine owns no wire format; it hands adapters a title, a body, and
//! a dedup tag and lets the platform decide how to surface them.

use std::future::Future;

use serde::Serialize;

/// A notification ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Short headline, e.g. `"Overdue task"`.
    pub title: String,
    /// Rendered body: a task title, or a comma-joined list of titles.
    pub body: String,
    /// Dedup tag identifying this notification's cooldown identity.
    pub tag: String,
}

/// Errors that can occur during notification delivery.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The platform cannot currently deliver (no capability, permission
    /// denied). Dispatch is skipped without error when this is detectable
    /// up front via [`Notifier::is_available`].
    #[error("notification platform unavailable")]
    Unavailable,

    /// Delivery was attempted and failed.
    #[error("delivery failed: {reason}")]
    Delivery {
        /// Channel-specific description of the failure.
        reason: String,
    },
}

/// Delivery channel for engine notifications.
pub trait Notifier {
    /// Whether the channel can currently deliver at all.
    fn is_available(&self) -> impl Future<Output = bool> + Send;

    /// Deliver one notification.
    fn notify(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

impl<T: Notifier + Send + Sync> Notifier for std::sync::Arc<T> {
    fn is_available(&self) -> impl Future<Output = bool> + Send {
        (**self).is_available()
    }

    fn notify(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send {
        (**self).notify(notification)
    }
}
