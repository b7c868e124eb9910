//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts bounded, URLs parseable)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use thiserror::Error;
use url::Url;

use crate::config::schema::ServerConfig;

/// Bounds for the upstream probe timeout, in seconds.
pub const PROBE_TIMEOUT_RANGE: std::ops::RangeInclusive<u64> = 1..=30;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.host must not be empty")]
    EmptyHost,
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,
    #[error("health.probe_timeout_secs must be in 1..=30, got {0}")]
    ProbeTimeoutOutOfRange(u64),
    #[error("upstream.airtable_base_url is not a valid http(s) URL: {0}")]
    InvalidUpstreamUrl(String),
    #[error("runtime.state_dir must not be empty")]
    EmptyStateDir,
    #[error("cors.origins must not be empty")]
    NoCorsOrigins,
    #[error("cors.origins entry is not a valid origin: {0}")]
    InvalidCorsOrigin(String),
}

/// Validate a configuration, collecting every violation.
pub fn validate(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::EmptyHost);
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if !PROBE_TIMEOUT_RANGE.contains(&config.health.probe_timeout_secs) {
        errors.push(ValidationError::ProbeTimeoutOutOfRange(
            config.health.probe_timeout_secs,
        ));
    }

    if !is_http_url(&config.upstream.airtable_base_url) {
        errors.push(ValidationError::InvalidUpstreamUrl(
            config.upstream.airtable_base_url.clone(),
        ));
    }

    if config.runtime.state_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyStateDir);
    }

    if config.cors.origins.is_empty() {
        errors.push(ValidationError::NoCorsOrigins);
    } else {
        for origin in &config.cors.origins {
            if origin != "*" && !is_http_url(origin) {
                errors.push(ValidationError::InvalidCorsOrigin(origin.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_http_url(raw: &str) -> bool {
    matches!(Url::parse(raw), Ok(url) if url.scheme() == "http" || url.scheme() == "https")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_violation() {
        let mut config = ServerConfig::default();
        config.listener.host = String::new();
        config.timeouts.request_secs = 0;
        config.health.probe_timeout_secs = 0;
        config.upstream.airtable_base_url = "not a url".to_string();

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::EmptyHost));
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(errors.contains(&ValidationError::ProbeTimeoutOutOfRange(0)));
    }

    #[test]
    fn test_probe_timeout_upper_bound() {
        let mut config = ServerConfig::default();
        config.health.probe_timeout_secs = 31;
        let errors = validate(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ProbeTimeoutOutOfRange(31)]);
    }

    #[test]
    fn test_wildcard_origin_is_allowed() {
        let mut config = ServerConfig::default();
        config.cors.origins = vec!["*".to_string(), "http://localhost:3000".to_string()];
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_malformed_origin() {
        let mut config = ServerConfig::default();
        config.cors.origins = vec!["localhost:3000".to_string()];
        assert!(matches!(
            validate(&config).unwrap_err().as_slice(),
            [ValidationError::InvalidCorsOrigin(_)]
        ));
    }

    #[test]
    fn test_rejects_non_http_upstream() {
        let mut config = ServerConfig::default();
        config.upstream.airtable_base_url = "ftp://api.airtable.com/v0".to_string();
        let errors = validate(&config).unwrap_err();
        assert!(matches!(errors.as_slice(), [ValidationError::InvalidUpstreamUrl(_)]));
    }
}
