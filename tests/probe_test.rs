//! HTTP probe behaviour against a mock backend.

use httpmock::prelude::*;

use opsboard::config::DashboardConfig;
use opsboard::model::HealthStatus;
use opsboard::probe::{HttpProbe, Probe};

fn probe_for(server: &MockServer) -> HttpProbe {
    let config = DashboardConfig {
        api_base: server.url("/api"),
        ..DashboardConfig::default()
    };
    HttpProbe::new(&config)
}

/// Nothing listens on port 1.
const DEAD_BASE: &str = "http://127.0.0.1:1/api";

#[tokio::test]
async fn healthy_body_is_reachable() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"healthy","service":"prices-api","version":"1.4.2"}"#);
        })
        .await;

    let report = probe_for(&server).health().await;
    m.assert_async().await;
    assert_eq!(report.status, HealthStatus::Reachable);
    assert_eq!(report.version.as_deref(), Some("1.4.2"));
    assert_eq!(report.service.as_deref(), Some("prices-api"));
    assert!(report.latency.is_some());
}

#[tokio::test]
async fn empty_json_object_is_reachable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).body("{}");
        })
        .await;

    let report = probe_for(&server).health().await;
    assert_eq!(report.status, HealthStatus::Reachable);
}

#[tokio::test]
async fn non_json_body_is_degraded() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).body("OK");
        })
        .await;

    let report = probe_for(&server).health().await;
    assert_eq!(report.status, HealthStatus::Degraded);
    assert!(report.detail.is_some());
}

#[tokio::test]
async fn unhealthy_status_is_degraded() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).body(r#"{"status":"starting"}"#);
        })
        .await;

    let report = probe_for(&server).health().await;
    assert_eq!(report.status, HealthStatus::Degraded);
    assert_eq!(report.detail.as_deref(), Some("backend reports 'starting'"));
}

#[tokio::test]
async fn server_error_is_unreachable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(503);
        })
        .await;

    let report = probe_for(&server).health().await;
    assert_eq!(report.status, HealthStatus::Unreachable);
    assert!(report.detail.as_deref().is_some_and(|d| d.contains("503")));
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    let config = DashboardConfig {
        api_base: DEAD_BASE.to_string(),
        ..DashboardConfig::default()
    };
    let report = HttpProbe::new(&config).health().await;
    assert_eq!(report.status, HealthStatus::Unreachable);
    assert!(report.latency.is_none());
}

#[tokio::test]
async fn record_count_reads_count_field() {
    let server = MockServer::start_async().await;
    let m = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/prices").query_param("limit", "1");
            then.status(200).body(r#"{"count":42,"items":[]}"#);
        })
        .await;

    let count = probe_for(&server).record_count().await.unwrap();
    m.assert_async().await;
    assert_eq!(count, 42);
}

#[tokio::test]
async fn record_count_missing_field_is_zero() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/prices");
            then.status(200).body(r#"{"items":[]}"#);
        })
        .await;

    assert_eq!(probe_for(&server).record_count().await.unwrap(), 0);
}

#[tokio::test]
async fn record_count_failures_are_network_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/prices");
            then.status(500);
        })
        .await;

    let err = probe_for(&server).record_count().await.unwrap_err();
    assert_eq!(err.error_code(), "NETWORK_FAILURE");

    let config = DashboardConfig {
        api_base: DEAD_BASE.to_string(),
        ..DashboardConfig::default()
    };
    let err = HttpProbe::new(&config).record_count().await.unwrap_err();
    assert_eq!(err.error_code(), "NETWORK_FAILURE");
}

#[tokio::test]
async fn reachable_accepts_any_http_answer() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/");
            then.status(404);
        })
        .await;

    let config = DashboardConfig::default();
    let probe = HttpProbe::new(&config);
    assert!(probe.reachable(&server.base_url()).await);
    assert!(!probe.reachable("http://127.0.0.1:1").await);
}
