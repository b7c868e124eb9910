//! OS signal handling.
//!
//! # Responsibilities
//! - Pick the richest signal set the platform supports
//! - Translate the first termination signal into a shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Unix listens for SIGTERM and SIGINT; other platforms get Ctrl+C only

/// Signal capability selected for this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStrategy {
    /// SIGTERM + SIGINT via tokio::signal::unix.
    UnixSignals,
    /// Ctrl+C only.
    CtrlCOnly,
}

impl SignalStrategy {
    /// Detect the best strategy for the current platform.
    pub fn detect() -> Self {
        if cfg!(unix) {
            SignalStrategy::UnixSignals
        } else {
            SignalStrategy::CtrlCOnly
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            SignalStrategy::UnixSignals => "SIGTERM+SIGINT",
            SignalStrategy::CtrlCOnly => "Ctrl+C",
        }
    }
}

/// Wait for the first termination signal the platform can deliver.
pub async fn wait_for_shutdown() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Termination signal received");
}
