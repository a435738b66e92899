//! Rule repository port — read access to automation rules.
//!
//! Rule CRUD is owned by the surrounding application; the engine only
//! ever reads the active rule set for a project.

use std::future::Future;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::ProjectId;
use taskhub_domain::rule::AutomationRule;

/// Read-only repository of [`AutomationRule`]s.
pub trait RuleRepository {
    /// All enabled rules in a project, in no particular order.
    ///
    /// The engine sorts by creation time before execution, so
    /// implementations are free to return rules however their backing
    /// store yields them.
    fn list_active(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, TaskHubError>> + Send;
}

impl<T: RuleRepository + Send + Sync> RuleRepository for std::sync::Arc<T> {
    fn list_active(
        &self,
        project_id: ProjectId,
    ) -> impl Future<Output = Result<Vec<AutomationRule>, TaskHubError>> + Send {
        (**self).list_active(project_id)
    }
}
