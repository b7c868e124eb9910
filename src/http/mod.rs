//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → request_id.rs (tag with UUID)
//!     → TraceLayer (structured request/response logging)
//!     → TimeoutLayer (outer request bound)
//!     → handlers.rs (/healthz, /health, /api/status)
//!     → JSON response, request ID propagated back
//! ```

pub mod handlers;
pub mod request_id;
pub mod server;

pub use request_id::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
