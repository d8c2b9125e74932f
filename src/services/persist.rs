use crate::domain::models::AuditReport;
use std::path::{Path, PathBuf};

/// Write the report as pretty JSON under the reports directory.
///
/// The filename carries a microsecond timestamp so rapid successive runs
/// in one process never collide. serde_json leaves non-ASCII text alone,
/// so Portuguese content survives unescaped.
pub fn save_report(reports_dir: &Path, report: &AuditReport) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(reports_dir)?;
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S_%6f");
    let path = reports_dir.join(format!("site_audit_{}.json", stamp));
    std::fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}
