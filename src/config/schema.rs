//! Configuration schema with serde defaults.
//!
//! Every section is optional in the TOML file; missing sections and fields
//! fall back to the defaults below, so a bare `dashboard-server` invocation
//! serves on 0.0.0.0:8000 against the stock Airtable endpoint.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::env::EnvSnapshot;

/// Root configuration for the dashboard server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    pub listener: ListenerConfig,
    pub timeouts: TimeoutConfig,
    pub health: HealthCheckConfig,
    pub upstream: UpstreamConfig,
    pub runtime: RuntimeConfig,
    pub cors: CorsConfig,
}

impl ServerConfig {
    /// Resolve the address to bind. The PORT environment variable takes
    /// precedence over the configured port.
    pub fn bind_address(&self, env: &EnvSnapshot) -> String {
        let port = env.port.unwrap_or(self.listener.port);
        format!("{}:{}", self.listener.host, port)
    }
}

/// Listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind unless overridden by the PORT environment variable.
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Request timeout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Outer per-request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Readiness check settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Upper bound on a single upstream probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Treat an unreachable upstream as unhealthy instead of degraded.
    pub downstream_critical: bool,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 5,
            downstream_critical: false,
        }
    }
}

/// Upstream API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the Airtable REST API.
    pub airtable_base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            airtable_base_url: "https://api.airtable.com/v0".to_string(),
        }
    }
}

/// Runtime filesystem layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Writable directory for logs and scratch state, provisioned at startup.
    pub state_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            state_dir: PathBuf::from("logs"),
        }
    }
}

/// Cross-origin settings for the dashboard frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. `"*"` allows any origin.
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: vec!["*".to_string()],
        }
    }
}
