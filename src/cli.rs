use clap::{Parser, Subcommand};

/// Exit code reserved for "audit found regressions" under --strict.
/// Distinct from 1 (runtime error) and 2 (clap usage error).
pub const STRICT_FAILURE_EXIT: i32 = 3;

#[derive(Parser, Debug)]
#[command(name = "sitecheck", version, about = "Static-site quality auditor")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Root of the site working tree to audit"
    )]
    pub site_dir: String,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full audit and write a timestamped JSON report
    Audit {
        #[arg(long, help = "Probe a sample of external URLs over HTTP")]
        network: bool,
        #[arg(long, default_value_t = 10, help = "Max external URLs to probe")]
        probe_limit: usize,
        #[arg(
            long,
            default_value_t = 5.0,
            help = "Per-request probe timeout in seconds"
        )]
        probe_timeout: f64,
        #[arg(long, help = "Exit non-zero when any check regresses")]
        strict: bool,
    },
    /// Print the synthesized internal route table
    Routes,
    /// Probe one image file's pixel dimensions
    Image { path: String },
}
