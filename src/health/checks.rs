//! Component health checks.
//!
//! Three components feed the readiness report:
//! - `environment`: required API keys present in the startup snapshot
//! - `filesystem`: state directory accepts writes
//! - `airtable`: upstream API answers the metadata probe
//!
//! Checks run concurrently, so the slowest component bounds the response
//! time and is itself bounded by the probe timeout.

use std::sync::Arc;

use futures_util::future::{join_all, BoxFuture};
use url::Url;

use crate::config::env::EnvSnapshot;
use crate::config::schema::ServerConfig;
use crate::health::probe::DownstreamProbe;
use crate::health::report::{ComponentReport, HealthReport};

/// Runs the component checks behind /health.
#[derive(Debug)]
pub struct HealthChecker {
    config: Arc<ServerConfig>,
    env: Arc<EnvSnapshot>,
    probe: DownstreamProbe,
}

impl HealthChecker {
    pub fn new(config: Arc<ServerConfig>, env: Arc<EnvSnapshot>) -> Self {
        let base_url = Url::parse(&config.upstream.airtable_base_url)
            .expect("upstream URL is checked at config load");
        let probe = DownstreamProbe::new(
            &base_url,
            env.airtable_api_key.clone(),
            config.health.probe_timeout_secs,
        );
        Self { config, env, probe }
    }

    /// Run every component check concurrently and aggregate the results.
    pub async fn evaluate(&self) -> HealthReport {
        let checks: Vec<BoxFuture<'_, ComponentReport>> = vec![
            Box::pin(self.check_environment()),
            Box::pin(self.check_filesystem()),
            Box::pin(self.check_downstream()),
        ];
        let results = join_all(checks).await;
        let report = HealthReport::from_components(results);
        tracing::debug!(status = %report.status, "Health evaluation complete");
        report
    }

    async fn check_environment(&self) -> ComponentReport {
        let missing = self.env.missing_required();
        if missing.is_empty() {
            ComponentReport::pass(
                "environment",
                false,
                "all required environment variables are set",
            )
        } else {
            ComponentReport::fail(
                "environment",
                false,
                format!(
                    "missing required environment variables: {}",
                    missing.join(", ")
                ),
            )
        }
    }

    async fn check_filesystem(&self) -> ComponentReport {
        let dir = &self.config.runtime.state_dir;
        let probe_path = dir.join(".healthcheck");
        let result = match tokio::fs::write(&probe_path, b"ok").await {
            Ok(()) => tokio::fs::remove_file(&probe_path).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => ComponentReport::pass(
                "filesystem",
                true,
                format!("state directory {} is writable", dir.display()),
            ),
            Err(e) => ComponentReport::fail(
                "filesystem",
                true,
                format!("state directory {} is not writable: {}", dir.display(), e),
            ),
        }
    }

    async fn check_downstream(&self) -> ComponentReport {
        let critical = self.config.health.downstream_critical;
        match self.probe.reachability().await {
            Ok(status) => ComponentReport::pass(
                "airtable",
                critical,
                format!("airtable API reachable (status {})", status),
            ),
            Err(e) => {
                tracing::warn!(url = %self.probe.url(), error = %e, "Airtable probe failed");
                ComponentReport::fail(
                    "airtable",
                    critical,
                    format!("airtable API unreachable: {}", e),
                )
            }
        }
    }
}
