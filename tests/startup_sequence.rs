//! Provisioning and lifecycle behavior of the startup supervisor.

mod common;

use std::time::Duration;

use dashboard_server::config::ServerConfig;
use dashboard_server::health::Phase;
use dashboard_server::lifecycle::{prepare_state_dir, startup, Provisioned, StartupError};

#[test]
fn provisioning_skips_existing_directory() {
    let dir = common::scratch_dir();
    std::fs::write(dir.join("existing.log"), b"keep me").unwrap();

    let outcome = prepare_state_dir(&dir).unwrap();

    assert_eq!(outcome, Provisioned::AlreadyPresent);
    let entries: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(std::fs::read(dir.join("existing.log")).unwrap(), b"keep me");
}

#[test]
fn provisioning_creates_missing_directory() {
    let dir = common::scratch_dir().join("nested").join("state");

    assert_eq!(prepare_state_dir(&dir).unwrap(), Provisioned::Created);
    assert!(dir.is_dir());

    // A second call sees the directory and does nothing.
    assert_eq!(prepare_state_dir(&dir).unwrap(), Provisioned::AlreadyPresent);
}

#[test]
fn provisioning_failure_reports_the_path() {
    let dir = common::scratch_dir();
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let err = prepare_state_dir(&blocker.join("state")).unwrap_err();
    match err {
        StartupError::Provision { path, .. } => assert_eq!(path, blocker.join("state")),
        other => panic!("expected provision error, got {:?}", other),
    }
}

#[tokio::test]
async fn provision_failure_preempts_bind() {
    let dir = common::scratch_dir();
    let blocker = dir.join("blocker");
    std::fs::write(&blocker, b"not a directory").unwrap();

    // Port 1 would fail to bind; a provision error proves we never got there.
    let config_path = dir.join("dashboard.toml");
    std::fs::write(
        &config_path,
        format!(
            "[listener]\nport = 1\n\n[runtime]\nstate_dir = {:?}\n",
            blocker.join("state")
        ),
    )
    .unwrap();

    let err = startup::run(Some(&config_path)).await.unwrap_err();
    assert!(matches!(err, StartupError::Provision { .. }));
}

#[test]
fn port_env_var_overrides_configured_port() {
    let config = ServerConfig::default();
    let env = common::env_from(&[("PORT", "9314")]);
    assert_eq!(config.bind_address(&env), "0.0.0.0:9314");
}

#[tokio::test]
async fn lifecycle_walks_listening_ready_stopping() {
    let dir = common::scratch_dir();
    let airtable = common::start_mock_airtable(200, Duration::ZERO).await;
    let server = common::spawn_server(common::test_config(&dir, airtable), common::full_env()).await;

    assert_eq!(server.lifecycle.phase(), Phase::Listening);

    common::client()
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(server.lifecycle.phase(), Phase::Ready);

    server.shutdown.trigger();
    assert_eq!(server.lifecycle.phase(), Phase::Stopping);

    // The listener drains; new connections are eventually refused.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(common::client()
        .get(server.url("/healthz"))
        .timeout(Duration::from_secs(1))
        .send()
        .await
        .is_err());
}

#[tokio::test]
async fn degraded_process_recovers_to_ready() {
    let dir = common::scratch_dir();
    let airtable = common::start_mock_airtable(200, Duration::ZERO).await;

    // Start with a state dir that rejects writes, then repair it.
    let state_dir = dir.join("state");
    let server = common::spawn_server(common::test_config(&state_dir, airtable), common::full_env()).await;

    common::client()
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(server.lifecycle.phase(), Phase::Degraded);

    std::fs::create_dir_all(&state_dir).unwrap();
    common::client()
        .get(server.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(server.lifecycle.phase(), Phase::Ready);

    server.shutdown.trigger();
}
