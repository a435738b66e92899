//! Automation rule — trigger → action pairs scoped to a project.
//!
//! Rules let a project react to task mutations without manual
//! intervention. Each rule has a [`Trigger`] that determines when it
//! fires and a single [`Action`] executed against the triggering task.
//! Rules are created by project members, soft-disabled via `enabled`,
//! and never mutated by the engine itself.

mod action;
mod trigger;

pub use action::{AUTOMATION_MARKER, Action};
pub use trigger::Trigger;

use serde::{Deserialize, Serialize};

use crate::error::{TaskHubError, ValidationError};
use crate::id::{ProjectId, RuleId, UserId};
use crate::time::Timestamp;

/// A declarative rule that reacts to task events by executing an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationRule {
    pub id: RuleId,
    pub project_id: ProjectId,
    pub name: String,
    /// Only enabled rules are eligible for matching.
    pub enabled: bool,
    pub trigger: Trigger,
    pub action: Action,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

impl AutomationRule {
    /// Create a builder for constructing an [`AutomationRule`].
    #[must_use]
    pub fn builder() -> AutomationRuleBuilder {
        AutomationRuleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - the action is an `AddComment` with an empty body
    ///   ([`ValidationError::EmptyCommentBody`])
    pub fn validate(&self) -> Result<(), TaskHubError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if let Action::AddComment { body } = &self.action {
            if body.is_empty() {
                return Err(ValidationError::EmptyCommentBody.into());
            }
        }
        Ok(())
    }
}

/// Step-by-step builder for [`AutomationRule`].
#[derive(Debug, Default)]
pub struct AutomationRuleBuilder {
    id: Option<RuleId>,
    project_id: Option<ProjectId>,
    name: Option<String>,
    enabled: Option<bool>,
    trigger: Option<Trigger>,
    action: Option<Action>,
    created_by: Option<UserId>,
    created_at: Option<Timestamp>,
}

impl AutomationRuleBuilder {
    #[must_use]
    pub fn id(mut self, id: RuleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn project_id(mut self, id: ProjectId) -> Self {
        self.project_id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    #[must_use]
    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn created_by(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }

    #[must_use]
    pub fn created_at(mut self, at: Timestamp) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Consume the builder, validate, and return an [`AutomationRule`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskHubError::Validation`] if required fields are missing
    /// or empty.
    pub fn build(self) -> Result<AutomationRule, TaskHubError> {
        let rule = AutomationRule {
            id: self.id.unwrap_or_default(),
            project_id: self.project_id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            enabled: self.enabled.unwrap_or(true),
            trigger: self.trigger.unwrap_or(Trigger::TaskCreated),
            action: self.action.unwrap_or(Action::ArchiveTask),
            created_by: self.created_by.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        };
        rule.validate()?;
        Ok(rule)
    }
}
