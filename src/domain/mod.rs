//! Shared data model layer (structs only).
//!
//! ## Purpose
//! - Keep report/output structs in one place.
//! - Make JSON report schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — findings, evidence, sections, the audit report.
//!
//! ## Rule of thumb
//! Domain types are data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! The report JSON is consumed downstream (the fix-apply hook reads the
//! latest report file). Field names and declaration order are the schema.

pub mod models;
