//! # taskhub-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RuleRepository` — read access to active automation rules
//!   - `TaskStore` — the engine's task reads and writes
//!   - `Directory` — tenant resolution for alert recipients
//!   - `Notifier` — outward notification delivery
//! - Provide the engine's use-cases:
//!   - `RuleEngine` — match triggers, execute actions, contain failures
//!   - `AlertScanner` — due-date scans with visibility filtering
//!   - `CooldownGate` — per-tag notification suppression
//!   - `AlertDispatcher` — turn scan results into notifications
//!   - `PollLoop` — the timer driving scan-and-dispatch cycles
//!
//! ## Dependency rule
//! Depends on `taskhub-domain` only (plus `tokio::sync`/`tokio::time`).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod alert_scanner;
pub mod clock;
pub mod cooldown;
pub mod dispatcher;
pub mod poll_loop;
pub mod ports;
pub mod rule_engine;
