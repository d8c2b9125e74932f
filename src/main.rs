use clap::Parser;

mod cli;
mod commands;
mod domain;
mod services;

use cli::{Cli, Commands};
use services::config::AuditConfig;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            if cli.json {
                let envelope = serde_json::json!({
                    "ok": false,
                    "error": { "code": "AUDIT_ERROR", "message": e.to_string() },
                });
                println!("{}", serde_json::to_string_pretty(&envelope).unwrap_or_default());
            } else {
                eprintln!("error: {}", e);
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    let config = AuditConfig::load(&cli.site_dir)?;
    match &cli.command {
        Commands::Audit { .. } => commands::handle_audit_command(cli, &config),
        Commands::Routes | Commands::Image { .. } => {
            commands::handle_inspect_commands(cli, &config)?;
            Ok(0)
        }
    }
}
