//! # taskhub-domain
//!
//! Pure domain model for the taskhub automation & alerting engine.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Tasks** (the read-model the engine observes and mutates)
//! - Define **Automation rules** (trigger → action pairs scoped to a project)
//! - Define **Task events** (ephemeral records of committed task mutations)
//! - Define **Alerts** (due-date classification of tasks at a point in time)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod alert;
pub mod event;
pub mod rule;
pub mod task;
