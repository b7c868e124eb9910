//! Startup orchestration.
//!
//! # Responsibilities
//! - Capture the environment and load configuration
//! - Provision runtime resources before the listener binds
//! - Bind the listener, then hand off to the HTTP server
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and the process exits nonzero
//! - Provisioning makes exactly one attempt; failures are never retried
//! - The listener binds last, so traffic only ever reaches a fully
//!   provisioned process

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::env::EnvSnapshot;
use crate::config::loader::{load_config, ConfigError};
use crate::http::server::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::{self, SignalStrategy};

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to provision state directory {}: {source}", .path.display())]
    Provision {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Outcome of a provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    /// The resource already existed; nothing was touched.
    AlreadyPresent,
    /// The resource was created by this call.
    Created,
}

/// Ensure the state directory exists.
///
/// Makes at most one create attempt. A failure is returned as-is; the
/// operator fixes the cause and restarts.
pub fn prepare_state_dir(path: &Path) -> Result<Provisioned, StartupError> {
    if path.is_dir() {
        return Ok(Provisioned::AlreadyPresent);
    }
    std::fs::create_dir_all(path).map_err(|source| StartupError::Provision {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Provisioned::Created)
}

/// Run the supervisor: provision, bind, serve until shutdown.
pub async fn run(config_path: Option<&Path>) -> Result<(), StartupError> {
    let env = Arc::new(EnvSnapshot::capture());
    let missing = env.missing_required();
    if missing.is_empty() {
        tracing::info!("All required environment variables are set");
    } else {
        tracing::warn!(
            missing = ?missing,
            "Required environment variables not set; service will start degraded"
        );
    }

    let config = Arc::new(load_config(config_path)?);
    tracing::info!(
        profile = env.profile.as_str(),
        bind_address = %config.bind_address(&env),
        state_dir = %config.runtime.state_dir.display(),
        probe_timeout_secs = config.health.probe_timeout_secs,
        "Configuration resolved"
    );

    match prepare_state_dir(&config.runtime.state_dir)? {
        Provisioned::Created => {
            tracing::info!(path = %config.runtime.state_dir.display(), "State directory created")
        }
        Provisioned::AlreadyPresent => {
            tracing::debug!(path = %config.runtime.state_dir.display(), "State directory already present")
        }
    }

    let addr = config.bind_address(&env);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let server = HttpServer::new(Arc::clone(&config), Arc::clone(&env));
    let lifecycle = server.lifecycle();
    let shutdown = Shutdown::new(lifecycle);
    let shutdown_rx = shutdown.subscribe();

    let strategy = SignalStrategy::detect();
    tracing::info!(signals = strategy.describe(), "Signal handling installed");
    tokio::spawn(async move {
        signals::wait_for_shutdown().await;
        shutdown.trigger();
    });

    server.run(listener, shutdown_rx).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}
