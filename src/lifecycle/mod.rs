//! Process lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! main()
//!     → startup.rs (env snapshot → config → provision → bind → serve)
//!     → signals.rs (platform signal set, first signal wins)
//!     → shutdown.rs (broadcast to tasks, lifecycle → Stopping)
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::SignalStrategy;
pub use startup::{prepare_state_dir, Provisioned, StartupError};
