//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! dashboard.toml (optional)
//!     → loader.rs (read, deserialize)
//!     → validation.rs (semantic checks, all errors collected)
//!     → schema.rs types, held in an Arc for the life of the process
//!
//! Process environment
//!     → env.rs (snapshot taken once at startup)
//! ```
//!
//! # Design Decisions
//! - No hot reload: configuration and environment are immutable after startup
//! - The PORT environment variable overrides the configured listener port

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{EnvSnapshot, Profile};
pub use loader::{load_config, ConfigError, DEFAULT_CONFIG_PATH};
pub use schema::ServerConfig;
pub use validation::{validate, ValidationError};
