//! Container healthcheck and operator CLI for the dashboard server.
//!
//! Exits 0 when the probed endpoint answers 2xx, 1 otherwise, so it can
//! back a container HEALTHCHECK or a quick smoke test.

use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "healthcheck", version, about = "Probe a running dashboard server")]
struct Cli {
    /// Base URL of the server.
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Liveness probe (GET /healthz).
    Live,
    /// Readiness probe (GET /health).
    Ready,
    /// Process status (GET /api/status).
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let path = match cli.command {
        Commands::Live => "/healthz",
        Commands::Ready => "/health",
        Commands::Status => "/api/status",
    };
    let url = format!("{}{}", cli.url.trim_end_matches('/'), path);

    let client = reqwest::Client::new();
    let response = client.get(&url).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    if !status.is_success() {
        eprintln!("Error: server answered {}", status);
        std::process::exit(1);
    }
    Ok(())
}
