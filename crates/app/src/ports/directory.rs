//! Directory port — tenant resolution for alert recipients.

use std::future::Future;

use taskhub_domain::error::TaskHubError;
use taskhub_domain::id::{OrganizationId, UserId};

/// Resolves which organization a user belongs to.
pub trait Directory {
    /// The user's organization, or `None` if the user is unknown.
    fn organization_of(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Option<OrganizationId>, TaskHubError>> + Send;
}

impl<T: Directory + Send + Sync> Directory for std::sync::Arc<T> {
    fn organization_of(
        &self,
        user: UserId,
    ) -> impl Future<Output = Result<Option<OrganizationId>, TaskHubError>> + Send {
        (**self).organization_of(user)
    }
}
