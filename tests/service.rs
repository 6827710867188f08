//! End-to-end tests for the HTTP entrypoint.

mod helpers;

use reqwest::StatusCode;
use serde_json::Value;

use helpers::{registry_for, spawn_service, RouteProbe};

async fn get(
    addr: std::net::SocketAddr,
    path: &str,
    forwarded_host: Option<&str>,
) -> (StatusCode, Value) {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("Failed to build test client");
    let mut request = client.get(format!("http://{}{}", addr, path));
    if let Some(host) = forwarded_host {
        request = request.header("X-Forwarded-Host", host);
    }
    let response = request.send().await.expect("request failed");
    let status = response.status();
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    let text = response.text().await.expect("Failed to read body");
    let body: Value = serde_json::from_str(&text).expect("body is JSON");
    (status, body)
}

#[tokio::test]
async fn test_resolved_chain_returns_ok() {
    let probe = RouteProbe::default()
        .route("https://t.co/abc", "https://bit.ly/next")
        .route("https://bit.ly/next", "https://example.com/story?id=7");
    let addr = spawn_service(registry_for(&["t.co", "bit.ly"], probe), 10).await;

    let (status, body) = get(addr, "/abc", Some("t.co")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "success");
    assert_eq!(body["result"], "https://example.com/story?id=7");
    assert!(body["error"].is_null());

    let visited = body["visited"].as_array().unwrap();
    assert_eq!(visited.len(), 2);
    assert_eq!(visited[0]["from"], "https://t.co/abc");
    assert_eq!(visited[0]["to"], "https://bit.ly/next");
    assert_eq!(visited[0]["using"]["host"], "t.co");
    assert_eq!(visited[0]["using"]["description"], "t.co test unwrapper");
    assert_eq!(visited[1]["using"]["host"], "bit.ly");
}

#[tokio::test]
async fn test_unknown_host_is_bad_request() {
    let addr = spawn_service(registry_for(&["t.co"], RouteProbe::default()), 10).await;

    let (status, body) = get(addr, "/abc", Some("example.com")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["state"], "error");
    assert!(body["result"].is_null());
    assert_eq!(body["error"]["kind"], "no_resolver_found");
    assert!(body["visited"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_location_is_bad_gateway_with_partial_history() {
    let probe = RouteProbe::default().route("https://t.co/abc", "https://bit.ly/gone");
    let addr = spawn_service(registry_for(&["t.co", "bit.ly"], probe), 10).await;

    let (status, body) = get(addr, "/abc", Some("t.co")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["result"].is_null());
    assert_eq!(body["error"]["kind"], "lookup_failed");
    assert_eq!(body["error"]["endpoint"], "https://bit.ly/gone");
    assert_eq!(body["visited"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cycle_is_loop_detected() {
    let probe = RouteProbe::default()
        .route("https://t.co/a", "https://bit.ly/b")
        .route("https://bit.ly/b", "https://t.co/a");
    let addr = spawn_service(registry_for(&["t.co", "bit.ly"], probe), 10).await;

    let (status, body) = get(addr, "/a", Some("t.co")).await;
    assert_eq!(status, StatusCode::LOOP_DETECTED);
    assert_eq!(body["state"], "cycle");
    assert_eq!(body["error"]["kind"], "cycle_detected");
    assert_eq!(body["error"]["endpoint"], "https://t.co/a");
    assert_eq!(body["visited"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_cycle_at_hop_limit_is_loop_detected() {
    let probe = RouteProbe::default().route("https://t.co/a", "https://t.co/a");
    let addr = spawn_service(registry_for(&["t.co"], probe), 1).await;

    let (status, body) = get(addr, "/a", Some("t.co")).await;
    assert_eq!(status, StatusCode::LOOP_DETECTED);
    assert_eq!(body["state"], "cycle");
    assert_eq!(body["error"]["kind"], "cycle_detected");
}

#[tokio::test]
async fn test_hop_limit_is_bad_gateway() {
    let probe = RouteProbe::default()
        .route("https://t.co/1", "https://t.co/2")
        .route("https://t.co/2", "https://t.co/3")
        .route("https://t.co/3", "https://example.com/");
    let addr = spawn_service(registry_for(&["t.co"], probe), 1).await;

    let (status, body) = get(addr, "/1", Some("t.co")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["state"], "error");
    assert_eq!(body["error"]["kind"], "hop_limit_exceeded");
    assert_eq!(body["visited"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_query_string_is_forwarded() {
    let probe = RouteProbe::default().route("https://t.co/abc?s=20", "https://example.com/");
    let addr = spawn_service(registry_for(&["t.co"], probe), 10).await;

    let (status, body) = get(addr, "/abc?s=20", Some("t.co")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visited"][0]["from"], "https://t.co/abc?s=20");
}

#[tokio::test]
async fn test_healthz_reports_registry_size() {
    let addr = spawn_service(registry_for(&["t.co", "bit.ly"], RouteProbe::default()), 10).await;

    let (status, body) = get(addr, "/_unwrapper/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["unwrappers"], 2);
}
