//! Clubguard CLI - route access checks and record conflict resolution
//!
//! Operator tooling over the same rules the web guards and sync workers use.

mod cli;
mod commands;
mod error;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::access::{run_access, run_default_route, run_routes};
use crate::commands::completions::run_completions;
use crate::commands::conflict::{run_detect, run_recommend, run_resolve};
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clubguard=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let routes = cli.routes.as_deref();

    match cli.command {
        Commands::Access {
            path,
            role,
            status,
            json,
        } => run_access(&path, role.as_deref(), status.as_deref(), json, routes)?,
        Commands::DefaultRoute { role, status } => {
            run_default_route(role.as_deref(), status.as_deref());
        }
        Commands::Routes { role, json } => run_routes(role.as_deref(), json, routes)?,
        Commands::Resolve {
            records,
            strategy,
            output,
        } => run_resolve(&records, strategy.as_deref(), output.as_deref())?,
        Commands::Detect { records, json } => run_detect(&records, json)?,
        Commands::Recommend {
            local_time,
            remote_time,
        } => run_recommend(&local_time, &remote_time),
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}
