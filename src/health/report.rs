//! Health report types and aggregation.
//!
//! A report is assembled from per-component results. Failures roll up into
//! the overall status: a failed critical component makes the service
//! unhealthy, a failed non-critical component only degrades it.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate service status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Ok,
    Degraded,
    Unhealthy,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Ok => "ok",
            OverallStatus::Degraded => "degraded",
            OverallStatus::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single component check.
#[derive(Debug, Clone)]
pub struct ComponentReport {
    pub name: &'static str,
    pub healthy: bool,
    /// Whether a failure of this component makes the whole service unhealthy.
    pub critical: bool,
    pub detail: String,
}

impl ComponentReport {
    pub fn pass(name: &'static str, critical: bool, detail: impl Into<String>) -> Self {
        Self {
            name,
            healthy: true,
            critical,
            detail: detail.into(),
        }
    }

    pub fn fail(name: &'static str, critical: bool, detail: impl Into<String>) -> Self {
        Self {
            name,
            healthy: false,
            critical,
            detail: detail.into(),
        }
    }
}

/// Readiness report served on /health.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    /// Component name → pass/fail.
    pub components: BTreeMap<&'static str, bool>,
    /// Component name → human-readable detail.
    pub details: BTreeMap<&'static str, String>,
}

impl HealthReport {
    /// Aggregate component results into a report.
    pub fn from_components(results: Vec<ComponentReport>) -> Self {
        let mut status = OverallStatus::Ok;
        let mut components = BTreeMap::new();
        let mut details = BTreeMap::new();

        for result in results {
            if !result.healthy {
                if result.critical {
                    status = OverallStatus::Unhealthy;
                } else if status == OverallStatus::Ok {
                    status = OverallStatus::Degraded;
                }
            }
            components.insert(result.name, result.healthy);
            details.insert(result.name, result.detail);
        }

        Self {
            status,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            components,
            details,
        }
    }

    /// HTTP status to serve this report with.
    pub fn status_code(&self) -> StatusCode {
        match self.status {
            OverallStatus::Ok | OverallStatus::Degraded => StatusCode::OK,
            OverallStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

/// Liveness report served on /healthz. Always ok while the process runs.
#[derive(Debug, Clone, Serialize)]
pub struct LivenessReport {
    pub status: OverallStatus,
    pub timestamp: DateTime<Utc>,
}

impl LivenessReport {
    pub fn now() -> Self {
        Self {
            status: OverallStatus::Ok,
            timestamp: Utc::now(),
        }
    }
}
