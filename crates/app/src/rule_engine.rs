//! Rule engine — reacts to task events by matching and executing rules.
//!
//! The engine runs synchronously inside the request that committed the
//! task mutation. It is best-effort by contract: the mutation that
//! triggered it must never fail because automation failed, so every
//! failure is contained here and reported through [`EventOutcome`] rather
//! than raised.

use taskhub_domain::error::TaskHubError;
use taskhub_domain::event::TaskEvent;
use taskhub_domain::id::RuleId;
use taskhub_domain::rule::{AUTOMATION_MARKER, Action, AutomationRule};

use crate::ports::{RuleRepository, TaskStore};

/// What happened to one matched rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule's action ran to completion.
    Executed { rule_id: RuleId },
    /// The rule's action failed; the failure was logged and contained.
    Failed { rule_id: RuleId, reason: String },
}

impl RuleOutcome {
    /// Whether this rule's action completed.
    #[must_use]
    pub fn is_executed(&self) -> bool {
        matches!(self, Self::Executed { .. })
    }
}

/// Result of processing one task event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// No active rule matched — a normal outcome, not a fault.
    NoMatch,
    /// Matched rules ran, each with its own contained result.
    Processed(Vec<RuleOutcome>),
    /// The rule query failed; automation was skipped for this event.
    Skipped,
}

/// Matches triggers against task events and executes rule actions.
pub struct RuleEngine<R, T> {
    rules: R,
    tasks: T,
}

impl<R, T> RuleEngine<R, T>
where
    R: RuleRepository,
    T: TaskStore,
{
    /// Create a new engine.
    pub fn new(rules: R, tasks: T) -> Self {
        Self { rules, tasks }
    }

    /// Process a single task event against the project's active rules.
    ///
    /// Matched rules execute sequentially in creation order. A failing
    /// action is caught and logged without aborting sibling rules, and a
    /// failing rule query degrades the whole call to a no-op. This method
    /// never returns an error.
    #[tracing::instrument(skip(self, event), fields(task_id = %event.task_id, change = %event.change))]
    pub async fn process_event(&self, event: &TaskEvent) -> EventOutcome {
        let rules = match self.rules.list_active(event.project_id).await {
            Ok(rules) => rules,
            Err(err) => {
                tracing::warn!(error = %err, "rule query failed, skipping automation for event");
                return EventOutcome::Skipped;
            }
        };

        let mut matched: Vec<AutomationRule> = rules
            .into_iter()
            .filter(|rule| rule.trigger.matches(&event.change))
            .collect();
        if matched.is_empty() {
            return EventOutcome::NoMatch;
        }
        matched.sort_by_key(|rule| rule.created_at);

        let mut outcomes = Vec::with_capacity(matched.len());
        for rule in &matched {
            match self.execute_action(rule, event).await {
                Ok(()) => {
                    tracing::debug!(rule_id = %rule.id, action = %rule.action, "rule action executed");
                    outcomes.push(RuleOutcome::Executed { rule_id: rule.id });
                }
                Err(err) => {
                    tracing::warn!(
                        rule_id = %rule.id,
                        action = %rule.action,
                        error = %err,
                        "rule action failed, continuing with remaining rules"
                    );
                    outcomes.push(RuleOutcome::Failed {
                        rule_id: rule.id,
                        reason: err.to_string(),
                    });
                }
            }
        }

        EventOutcome::Processed(outcomes)
    }

    /// Execute a single rule action against the triggering task.
    async fn execute_action(
        &self,
        rule: &AutomationRule,
        event: &TaskEvent,
    ) -> Result<(), TaskHubError> {
        match &rule.action {
            Action::AddComment { body } => {
                let body = format!("{AUTOMATION_MARKER}{body}");
                self.tasks.add_comment(event.task_id, event.actor, body).await
            }
            Action::AssignUser { user_id } => {
                match self.tasks.assign_user(event.task_id, *user_id).await {
                    // Already assigned: the action is idempotent, not a failure.
                    Err(TaskHubError::Conflict(_)) => {
                        tracing::debug!(
                            rule_id = %rule.id,
                            user_id = %user_id,
                            "assignment already exists"
                        );
                        Ok(())
                    }
                    other => other,
                }
            }
            Action::ArchiveTask => self.tasks.archive(event.task_id).await,
        }
    }
}
