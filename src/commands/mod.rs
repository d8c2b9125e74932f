//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `audit.rs` — the full audit pipeline and strict-mode exit wiring.
//! - `inspect.rs` — routes/image helper commands.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate business logic to `services/*`.
//! - Keep behavior and output schema stable.

pub mod audit;
pub mod inspect;

pub use audit::handle_audit_command;
pub use inspect::handle_inspect_commands;
