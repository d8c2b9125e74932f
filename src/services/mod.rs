//! Service layer containing the audit pipeline and side-effect helpers.
//!
//! ## Service map
//! - `config.rs` — audit configuration from CLI + `.sitecheck.toml` + `_config.yml`.
//! - `frontmatter.rs` — permissive front-matter extraction.
//! - `routes.rs` — route table synthesis from content files.
//! - `scanner.rs` — text scan + the pattern detector battery.
//! - `imagemeta.rs` — raw PNG/JPEG header dimension probing.
//! - `netprobe.rs` — bounded HEAD-then-GET reachability sampling.
//! - `report.rs` — section scoring, aggregation, strict failure codes.
//! - `persist.rs` — timestamped JSON report persistence.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod frontmatter;
pub mod imagemeta;
pub mod netprobe;
pub mod persist;
pub mod report;
pub mod routes;
pub mod scanner;
