//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the use-case layer
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod directory;
pub mod notifier;
pub mod rule_repo;
pub mod task_store;

pub use directory::Directory;
pub use notifier::{Notification, Notifier, NotifyError};
pub use rule_repo::RuleRepository;
pub use task_store::TaskStore;
