use crate::cli::{Cli, Commands};
use crate::domain::models::JsonOut;
use crate::services::config::AuditConfig;
use crate::services::imagemeta::image_dimensions;
use crate::services::routes::build_routes;
use serde::Serialize;
use std::path::Path;

pub fn handle_inspect_commands(cli: &Cli, config: &AuditConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Routes => {
            let routes: Vec<String> = build_routes(config)?.into_iter().collect();
            if cli.json {
                print_envelope(&routes)?;
            } else {
                for route in &routes {
                    println!("{}", route);
                }
            }
        }
        Commands::Image { path } => {
            let dims = image_dimensions(Path::new(path));
            if cli.json {
                print_envelope(&dims)?;
            } else {
                match dims {
                    Some((w, h)) => println!("{}x{}", w, h),
                    None => println!("unknown"),
                }
            }
        }
        Commands::Audit { .. } => anyhow::bail!("not an inspect invocation"),
    }
    Ok(())
}

fn print_envelope<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}
