//! Upstream reachability probe.
//!
//! # Design Decisions
//! - One reqwest client, built at startup, reused for every probe
//! - Probes are bounded twice: the client timeout and an outer tokio
//!   timeout, so a stuck connection can never stall a readiness poll
//! - Auth rejections (401/403) count as reachable: the endpoint answered

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Why a probe concluded the upstream is not reachable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("probe timed out after {0}s")]
    Timeout(u64),
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("unexpected status {0}")]
    Status(u16),
}

/// Bounded GET against the upstream metadata endpoint.
#[derive(Debug, Clone)]
pub struct DownstreamProbe {
    client: reqwest::Client,
    probe_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl DownstreamProbe {
    pub fn new(base_url: &Url, api_key: Option<String>, timeout_secs: u64) -> Self {
        let timeout = Duration::from_secs(timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            probe_url: probe_url(base_url),
            api_key,
            timeout,
        }
    }

    /// Probe the upstream once. Returns the HTTP status when the endpoint
    /// answered with a status that proves reachability.
    pub async fn reachability(&self) -> Result<u16, ProbeError> {
        let mut request = self.client.get(self.probe_url.clone());
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        match tokio::time::timeout(self.timeout, request.send()).await {
            Ok(Ok(response)) => {
                let status = response.status();
                if is_reachable_status(status) {
                    Ok(status.as_u16())
                } else {
                    Err(ProbeError::Status(status.as_u16()))
                }
            }
            Ok(Err(e)) if e.is_timeout() => Err(ProbeError::Timeout(self.timeout.as_secs())),
            Ok(Err(e)) => Err(ProbeError::Connect(e.to_string())),
            Err(_) => Err(ProbeError::Timeout(self.timeout.as_secs())),
        }
    }

    pub fn url(&self) -> &Url {
        &self.probe_url
    }
}

/// 2xx proves the endpoint works; 401/403 prove it answered and merely
/// rejected our credentials.
pub fn is_reachable_status(status: StatusCode) -> bool {
    status.is_success() || status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Append the metadata path to the configured base URL.
fn probe_url(base: &Url) -> Url {
    let mut url = base.clone();
    let path = format!("{}/meta", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_url_appends_meta() {
        let base = Url::parse("https://api.airtable.com/v0").unwrap();
        assert_eq!(probe_url(&base).as_str(), "https://api.airtable.com/v0/meta");

        let trailing = Url::parse("http://localhost:9000/v0/").unwrap();
        assert_eq!(probe_url(&trailing).as_str(), "http://localhost:9000/v0/meta");
    }

    #[test]
    fn test_reachable_statuses() {
        assert!(is_reachable_status(StatusCode::OK));
        assert!(is_reachable_status(StatusCode::UNAUTHORIZED));
        assert!(is_reachable_status(StatusCode::FORBIDDEN));
        assert!(!is_reachable_status(StatusCode::NOT_FOUND));
        assert!(!is_reachable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_reachable_status(StatusCode::BAD_GATEWAY));
    }

    #[tokio::test]
    async fn test_connection_refused_maps_to_connect_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{}", addr)).unwrap();
        let probe = DownstreamProbe::new(&base, None, 2);
        match probe.reachability().await {
            Err(ProbeError::Connect(_)) => {}
            other => panic!("expected connect error, got {:?}", other),
        }
    }
}
