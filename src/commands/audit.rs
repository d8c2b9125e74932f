use crate::cli::{Cli, Commands, STRICT_FAILURE_EXIT};
use crate::domain::models::JsonOut;
use crate::services::config::AuditConfig;
use crate::services::netprobe::{probe_sample, sample_urls};
use crate::services::persist::save_report;
use crate::services::report::{build_report, failure_codes};
use crate::services::routes::build_routes;
use crate::services::scanner::scan_site;

/// Run the audit pipeline end to end. Returns the process exit code:
/// 0 for a completed run, STRICT_FAILURE_EXIT when --strict finds
/// regressions. Invocation errors propagate as anyhow errors instead.
pub fn handle_audit_command(cli: &Cli, config: &AuditConfig) -> anyhow::Result<i32> {
    let Commands::Audit {
        network,
        probe_limit,
        probe_timeout,
        strict,
    } = &cli.command
    else {
        anyhow::bail!("not an audit invocation");
    };

    if !config.site_root.is_dir() {
        anyhow::bail!("site root not found: {}", config.site_root.display());
    }

    let routes = build_routes(config)?;
    let scan = scan_site(config, &routes);

    let probes = if *network {
        let sampled = sample_urls(
            &scan.external_urls,
            &scan.preconnect_hosts,
            &config.probe_exclude,
            *probe_limit,
        );
        log::info!("probing {} external URLs", sampled.len());
        Some(probe_sample(&sampled, *probe_timeout)?)
    } else {
        None
    };

    let report = build_report(config, &scan, probes);
    let failures = failure_codes(&report);
    let path = save_report(&config.reports_dir, &report)?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut {
                ok: failures.is_empty() || !*strict,
                data: serde_json::json!({
                    "report_path": path.to_string_lossy(),
                    "overall_score": report.overall_score,
                    "failures": failures,
                }),
            })?
        );
    } else {
        println!("{}", path.display());
    }

    if *strict && !failures.is_empty() {
        if !cli.json {
            println!("audit regressions: {}", failures.join(" "));
        }
        return Ok(STRICT_FAILURE_EXIT);
    }
    Ok(0)
}
