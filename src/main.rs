//! Supervisor entry point: provision, bind, serve.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use dashboard_server::config::load_config;
use dashboard_server::lifecycle::startup;
use dashboard_server::observability::logging;

#[derive(Parser)]
#[command(name = "dashboard-server", version, about = "Attribution dashboard server")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load .env before the snapshot and before the log filter reads RUST_LOG.
    let dotenv = dotenvy::dotenv();

    logging::init("dashboard_server=info,tower_http=info");

    if let Ok(path) = dotenv {
        tracing::info!(path = %path.display(), "Environment loaded from .env file");
    }

    if cli.print_config {
        return print_config(cli.config.as_deref());
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "dashboard-server starting");

    match startup::run(cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}

fn print_config(path: Option<&Path>) -> ExitCode {
    match load_config(path) {
        Ok(config) => match toml::to_string_pretty(&config) {
            Ok(rendered) => {
                println!("{}", rendered);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: failed to render config: {}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
