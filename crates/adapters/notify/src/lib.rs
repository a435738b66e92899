//! # taskhub-adapter-notify
//!
//! Delivery channels behind the engine's [`Notifier`] port. The webhook
//! channel posts notifications as JSON to a configured endpoint; the null
//! channel reports itself unavailable so the dispatcher skips a cycle
//! cleanly instead of erroring on every alert.
//!
//! ## Dependency rule
//!
//! Depends on `taskhub-app` (port types) and the HTTP client only.

use std::future::Future;

use taskhub_app::ports::{Notification, Notifier, NotifyError};

/// Posts each notification as a JSON payload to one webhook URL.
///
/// The endpoint receives the [`Notification`] fields verbatim:
///
/// ```json
/// {"title": "Overdue task", "body": "Ship the report", "tag": "overdue-<id>"}
/// ```
///
/// Non-2xx responses and transport errors surface as
/// [`NotifyError::Delivery`]; the dispatcher logs and moves on.
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    url: String,
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier targeting `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// The configured endpoint.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Notifier for WebhookNotifier {
    fn is_available(&self) -> impl Future<Output = bool> + Send {
        // Configuration-level availability. Transport failures are a
        // per-delivery concern, reported from `notify`.
        let configured = !self.url.is_empty();
        async move { configured }
    }

    fn notify(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send {
        async move {
            let response = self
                .client
                .post(&self.url)
                .json(&notification)
                .send()
                .await
                .map_err(|err| NotifyError::Delivery {
                    reason: err.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                tracing::warn!(url = %self.url, %status, tag = %notification.tag, "webhook returned non-2xx status");
                return Err(NotifyError::Delivery {
                    reason: format!("webhook returned {status}"),
                });
            }

            tracing::debug!(url = %self.url, tag = %notification.tag, "webhook notification delivered");
            Ok(())
        }
    }
}

/// A channel that is never available.
///
/// Used when no webhook URL is configured; the dispatcher's availability
/// check turns every cycle into a quiet no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn is_available(&self) -> impl Future<Output = bool> + Send {
        async { false }
    }

    fn notify(
        &self,
        _notification: Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send {
        async { Err(NotifyError::Unavailable) }
    }
}
