//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! GET /health
//!     → checks.rs (environment, filesystem, airtable, run concurrently)
//!     → probe.rs (bounded upstream GET)
//!     → report.rs (aggregate into ok | degraded | unhealthy)
//!     → state.rs (fold the outcome into the lifecycle machine)
//! ```
//!
//! Liveness (`/healthz`) bypasses all of this: a process that can answer
//! at all is alive.

pub mod checks;
pub mod probe;
pub mod report;
pub mod state;

pub use checks::HealthChecker;
pub use probe::{DownstreamProbe, ProbeError};
pub use report::{ComponentReport, HealthReport, LivenessReport, OverallStatus};
pub use state::{Lifecycle, Phase};
