//! Attribution Dashboard server.
//!
//! A supervised web server with a health reporting surface: the supervisor
//! provisions runtime resources before binding, and the HTTP layer serves
//! liveness (`/healthz`), readiness (`/health`) and process status
//! (`/api/status`) for platform orchestrators and the dashboard frontend.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{EnvSnapshot, ServerConfig};
pub use health::{HealthChecker, Lifecycle, OverallStatus, Phase};
pub use http::HttpServer;
pub use lifecycle::{Shutdown, StartupError};
