//! Shared helpers for integration tests.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use dashboard_server::config::{EnvSnapshot, ServerConfig};
use dashboard_server::health::Lifecycle;
use dashboard_server::lifecycle::Shutdown;
use dashboard_server::HttpServer;

/// A server under test plus the handles needed to poke at it.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub lifecycle: Arc<Lifecycle>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Spawn a server on an ephemeral port with the given config and environment.
pub async fn spawn_server(config: ServerConfig, env: EnvSnapshot) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(Arc::new(config), Arc::new(env));
    let lifecycle = server.lifecycle();
    let shutdown = Shutdown::new(Arc::clone(&lifecycle));
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestServer {
        addr,
        shutdown,
        lifecycle,
    }
}

/// Start a mock Airtable endpoint that answers every request with `status`
/// after `delay`.
pub async fn start_mock_airtable(status: u16, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                // Drain the request before answering so the close is clean.
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let reason = match status {
                    200 => "OK",
                    401 => "Unauthorized",
                    403 => "Forbidden",
                    500 => "Internal Server Error",
                    503 => "Service Unavailable",
                    _ => "OK",
                };
                let body = "{}";
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Config pointing at the mock upstream, with a short probe timeout and a
/// test-owned state directory.
pub fn test_config(state_dir: &Path, airtable: SocketAddr) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.runtime.state_dir = state_dir.to_path_buf();
    config.upstream.airtable_base_url = format!("http://{}/v0", airtable);
    config.health.probe_timeout_secs = 2;
    config
}

/// Fresh scratch directory for a test's state dir.
pub fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dashboard-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Environment with both API keys present.
pub fn full_env() -> EnvSnapshot {
    env_from(&[("CLAUDE_API_KEY", "sk-test"), ("AIRTABLE_API_KEY", "key-test")])
}

/// Environment with nothing set at all.
pub fn empty_env() -> EnvSnapshot {
    env_from(&[])
}

/// Build a snapshot from explicit key/value pairs.
pub fn env_from(vars: &[(&str, &str)]) -> EnvSnapshot {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvSnapshot::from_lookup(move |key| {
        vars.iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.clone())
    })
}

/// HTTP client that ignores system proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
