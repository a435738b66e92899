//! # taskhubd — taskhub engine daemon
//!
//! Composition root that wires storage, the notification channel, and the
//! engine loops together.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the storage adapter and seed demo data
//! - Construct the rule engine and the alert pipeline, injecting
//!   adapters via port traits
//! - Start the poll loop
//! - Handle graceful shutdown (SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

use std::future::Future;
use std::sync::Arc;

use taskhub_adapter_memory::MemoryStore;
use taskhub_adapter_notify::{NullNotifier, WebhookNotifier};
use taskhub_app::alert_scanner::AlertScanner;
use taskhub_app::clock::SystemClock;
use taskhub_app::cooldown::CooldownGate;
use taskhub_app::dispatcher::AlertDispatcher;
use taskhub_app::poll_loop::{AlertPipeline, PollLoop};
use taskhub_app::ports::{Notification, Notifier, NotifyError};
use taskhub_app::rule_engine::RuleEngine;
use taskhub_domain::event::{TaskChange, TaskEvent};
use taskhub_domain::id::{OrganizationId, ProjectId, TaskId, UserId};
use taskhub_domain::rule::{Action, AutomationRule, Trigger};
use taskhub_domain::task::{Task, TaskPriority};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

/// The channel picked at startup from configuration.
enum Channel {
    Webhook(WebhookNotifier),
    Disabled(NullNotifier),
}

impl Channel {
    fn from_config(config: &Config) -> Self {
        if config.notify.webhook_url.is_empty() {
            tracing::warn!("no webhook URL configured, notifications disabled");
            Self::Disabled(NullNotifier)
        } else {
            Self::Webhook(WebhookNotifier::new(config.notify.webhook_url.clone()))
        }
    }
}

impl Notifier for Channel {
    fn is_available(&self) -> impl Future<Output = bool> + Send {
        async move {
            match self {
                Self::Webhook(inner) => inner.is_available().await,
                Self::Disabled(inner) => inner.is_available().await,
            }
        }
    }

    fn notify(
        &self,
        notification: Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send {
        async move {
            match self {
                Self::Webhook(inner) => inner.notify(notification).await,
                Self::Disabled(inner) => inner.notify(notification).await,
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.logging.filter))
        .init();

    // Storage
    let store = Arc::new(MemoryStore::new());
    let (user, demo_task, demo_project) = seed(&store)?;

    // Rule engine: run seeded automations against the demo task's
    // creation so the effect shows up in the logs.
    let engine = RuleEngine::new(Arc::clone(&store), Arc::clone(&store));
    let event = TaskEvent::new(demo_task, demo_project, user, TaskChange::Created);
    let outcome = engine.process_event(&event).await;
    tracing::info!(?outcome, "seed event processed");
    for comment in store.comments_for(demo_task) {
        tracing::info!(body = %comment.body, "automation comment");
    }

    // Alert pipeline
    let scanner = AlertScanner::new(Arc::clone(&store), Arc::clone(&store), SystemClock);
    let dispatcher = AlertDispatcher::new(
        Channel::from_config(&config),
        CooldownGate::new(config.cooldown_window()),
    );
    let pipeline = Arc::new(AlertPipeline::new(scanner, dispatcher));

    let poll = PollLoop::start(pipeline, user, config.poll_interval());
    tracing::info!(
        poll_interval_secs = config.engine.poll_interval_secs,
        cooldown_secs = config.engine.cooldown_secs,
        "taskhubd running, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c().await?;
    poll.stop().await;
    tracing::info!("taskhubd stopped");

    Ok(())
}

/// Seed an organization, a member, a couple of due tasks, and one
/// automation rule. Returns the member plus the task and project whose
/// creation the startup demo replays.
fn seed(store: &MemoryStore) -> anyhow::Result<(UserId, TaskId, ProjectId)> {
    let org = OrganizationId::new();
    let user = UserId::new();
    store.insert_member(user, org);

    let now = taskhub_domain::time::now();
    let overdue = Task::builder()
        .organization_id(org)
        .title("Ship the quarterly report")
        .project_name("Finance")
        .priority(TaskPriority::Urgent)
        .due_date(now - chrono::Duration::hours(2))
        .build()?;
    let upcoming = Task::builder()
        .organization_id(org)
        .title("Review onboarding docs")
        .project_name("People")
        .due_date(now + chrono::Duration::hours(20))
        .build()?;
    let demo = Task::builder()
        .organization_id(org)
        .title("Triage incoming bug reports")
        .project_name("Support")
        .priority(TaskPriority::High)
        .build()?;
    let demo_id = demo.id;
    let demo_project = demo.project_id;
    store.insert_task(overdue);
    store.insert_task(upcoming);
    store.insert_task(demo);

    let rule = AutomationRule::builder()
        .project_id(demo_project)
        .name("Welcome new tasks")
        .trigger(Trigger::TaskCreated)
        .action(Action::AddComment {
            body: "Thanks, this task is now being tracked.".to_string(),
        })
        .created_by(user)
        .build()?;
    store.insert_rule(rule);

    Ok((user, demo_id, demo_project))
}
