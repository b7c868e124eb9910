//! Route handlers for the operational endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::health::report::{HealthReport, LivenessReport};
use crate::http::server::AppState;

/// GET /healthz: liveness. Answers ok for as long as the process can
/// serve requests at all, regardless of configuration state.
pub async fn healthz() -> Json<LivenessReport> {
    Json(LivenessReport::now())
}

/// GET /health: readiness. Runs the component checks and serves the
/// aggregate with 200 (ok, degraded) or 503 (unhealthy).
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.checker.evaluate().await;
    state.lifecycle.record_evaluation(report.status);
    (report.status_code(), Json(report))
}

/// GET /api/status: process and configuration summary for the dashboard.
pub async fn api_status(State(state): State<AppState>) -> Json<Value> {
    let effective_port = state
        .env
        .port
        .unwrap_or(state.config.listener.port)
        .to_string();

    Json(json!({
        "application": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "lifecycle": state.lifecycle.phase().as_str(),
        "timestamp": Utc::now(),
        "configuration": {
            "profile": state.env.profile.as_str(),
            "bind_address": state.config.bind_address(&state.env),
            "environment_variables": {
                "CLAUDE_API_KEY": presence(state.env.claude_api_key.as_deref()),
                "AIRTABLE_API_KEY": presence(state.env.airtable_api_key.as_deref()),
                "PORT": effective_port,
            },
        },
    }))
}

/// JSON 404 for unknown paths.
pub async fn fallback() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": "The requested resource was not found",
        })),
    )
}

fn presence(value: Option<&str>) -> &'static str {
    if value.is_some() {
        "present"
    } else {
        "missing"
    }
}
