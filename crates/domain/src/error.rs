//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`TaskHubError`] via `#[from]` — no `String` variants at the top level.

/// Top-level error for the engine and its ports.
#[derive(Debug, thiserror::Error)]
pub enum TaskHubError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// A write collided with an existing record (e.g. duplicate assignment).
    #[error("conflict")]
    Conflict(#[from] ConflictError),

    /// The persistent store failed to serve a read or write.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A rule must carry a human-readable name.
    #[error("name must not be empty")]
    EmptyName,
    /// A task must carry a title.
    #[error("title must not be empty")]
    EmptyTitle,
    /// An `AddComment` action must carry a non-empty body.
    #[error("comment body must not be empty")]
    EmptyCommentBody,
}

/// A referenced record was not found.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Record kind, e.g. `"Task"`.
    pub entity: &'static str,
    /// Identifier that failed to resolve.
    pub id: String,
}

/// A write conflicted with an existing record.
#[derive(Debug, thiserror::Error)]
#[error("{entity} already exists: {id}")]
pub struct ConflictError {
    /// Record kind, e.g. `"Assignment"`.
    pub entity: &'static str,
    /// Identifier of the colliding record.
    pub id: String,
}

/// The persistent store failed.
#[derive(Debug, thiserror::Error)]
#[error("storage backend failure: {reason}")]
pub struct StorageError {
    /// Backend-specific description of the failure.
    pub reason: String,
}

impl StorageError {
    /// Create a storage error from any displayable reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
