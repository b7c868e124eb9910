//! Axum server assembly.
//!
//! # Responsibilities
//! - Build the router for the operational endpoints
//! - Apply the shared middleware stack (request ID, tracing, timeout, CORS)
//! - Run the accept loop with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::env::EnvSnapshot;
use crate::config::schema::{CorsConfig, ServerConfig};
use crate::health::checks::HealthChecker;
use crate::health::state::Lifecycle;
use crate::http::handlers;
use crate::http::request_id::{UuidRequestId, X_REQUEST_ID};

/// Shared state for the operational handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub env: Arc<EnvSnapshot>,
    pub lifecycle: Arc<Lifecycle>,
    pub checker: Arc<HealthChecker>,
}

/// HTTP server with the health surface mounted.
pub struct HttpServer {
    router: Router,
    lifecycle: Arc<Lifecycle>,
}

impl HttpServer {
    /// Build a server exposing only the operational endpoints.
    pub fn new(config: Arc<ServerConfig>, env: Arc<EnvSnapshot>) -> Self {
        Self::with_dashboard(config, env, Router::new())
    }

    /// Build a server with the dashboard's own routes merged in.
    ///
    /// The dashboard router must not define its own fallback; unknown
    /// paths fall through to the JSON 404 here.
    pub fn with_dashboard(
        config: Arc<ServerConfig>,
        env: Arc<EnvSnapshot>,
        dashboard: Router,
    ) -> Self {
        let lifecycle = Arc::new(Lifecycle::new());
        let checker = Arc::new(HealthChecker::new(Arc::clone(&config), Arc::clone(&env)));
        let state = AppState {
            config: Arc::clone(&config),
            env,
            lifecycle: Arc::clone(&lifecycle),
            checker,
        };

        let request_id_header = HeaderName::from_static(X_REQUEST_ID);
        let middleware = ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header.clone(), UuidRequestId))
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::new(request_id_header));

        let router = Router::new()
            .route("/healthz", get(handlers::healthz))
            .route("/health", get(handlers::health))
            .route("/api/status", get(handlers::api_status))
            .fallback(handlers::fallback)
            .with_state(state)
            .merge(dashboard)
            .layer(middleware)
            .layer(cors_layer(&config.cors));

        Self { router, lifecycle }
    }

    /// Handle to the lifecycle machine, shared with the shutdown coordinator.
    pub fn lifecycle(&self) -> Arc<Lifecycle> {
        Arc::clone(&self.lifecycle)
    }

    /// Serve until the shutdown channel fires, then drain gracefully.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        self.lifecycle.mark_listening();
        tracing::info!(address = %addr, "HTTP server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = config
        .origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
