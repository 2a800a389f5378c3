//! HTTP integration tests.
//!
//! Each test starts the real router on an ephemeral port and talks to it over
//! HTTP with reqwest. The environment and clock are pinned through `AppState`
//! unless a test is specifically about the system clock.
//!
//! Run with: cargo test --test http_tests
use std::net::SocketAddr;
use std::sync::Arc;

use axum_server::Handle;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::StatusCode;
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinSet;

use ec2_autoscaling_demo::clock::{FixedClock, SystemClock};
use ec2_autoscaling_demo::config::AppConfig;
use ec2_autoscaling_demo::environment::StaticEnv;
use ec2_autoscaling_demo::http::{serve_development, serve_threaded};
use ec2_autoscaling_demo::templates::init_templates;
use ec2_autoscaling_demo::{create_router, AppState};

const INFO_BODY: &str = r#"{"app_name":"EC2 Auto Scaling Demo","description":"Flask application running on EC2 Auto Scaling Group","features":["Auto Scaling","Load Balancer","CodeDeploy","GitHub Actions CI/CD"],"version":"1.0.0"}"#;

fn fixed_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_micro_opt(12, 30, 45, 123456)
        .unwrap()
}

fn state_with(env: StaticEnv) -> AppState {
    let config = AppConfig::default();
    let tera = init_templates(&config.templates).expect("built-in templates");
    AppState::with_sources(config, tera, Arc::new(env), Arc::new(FixedClock(fixed_time())))
}

fn identity_env() -> StaticEnv {
    StaticEnv::new()
        .with("INSTANCE_ID", "i-0123abc")
        .with("AWS_REGION", "us-east-1")
}

/// Start the threaded server on an ephemeral port and return its base URL.
async fn spawn_threaded(state: AppState) -> String {
    let handle = Handle::new();
    let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
    tokio::spawn(serve_threaded(create_router(state), addr, handle.clone()));

    let bound = handle
        .listening()
        .await
        .expect("server did not start listening");
    format!("http://{}", bound)
}

/// Start the development server on an ephemeral port and return its base URL.
async fn spawn_development(state: AppState) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let bound = listener.local_addr().unwrap();
    tokio::spawn(serve_development(create_router(state), listener));
    format!("http://{}", bound)
}

async fn get_json(url: &str) -> (StatusCode, Value) {
    let response = reqwest::get(url).await.expect("request failed");
    let status = response.status();
    (status, response.json().await.expect("invalid JSON body"))
}

#[tokio::test]
async fn test_index_returns_html() {
    let base = spawn_threaded(state_with(StaticEnv::new())).await;

    let response = reqwest::get(format!("{}/", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(
        response.headers()["cache-control"].to_str().unwrap(),
        "public, max-age=60"
    );

    let body = response.text().await.unwrap();
    assert!(!body.is_empty());
    assert!(body.contains("<html"));
}

#[tokio::test]
async fn test_health_reports_identity() {
    let base = spawn_threaded(state_with(identity_env())).await;

    let (status, body) = get_json(&format!("{}/api/health", base)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "status": "healthy",
            "timestamp": "2024-06-01T12:30:45.123456",
            "instance_id": "i-0123abc",
            "region": "us-east-1",
        })
    );
}

#[tokio::test]
async fn test_health_defaults_to_unknown() {
    let base = spawn_threaded(state_with(StaticEnv::new())).await;

    let (_, body) = get_json(&format!("{}/api/health", base)).await;
    assert_eq!(body["instance_id"], "unknown");
    assert_eq!(body["region"], "unknown");
}

#[tokio::test]
async fn test_health_empty_env_is_unknown() {
    let env = StaticEnv::new().with("INSTANCE_ID", "").with("AWS_REGION", "");
    let base = spawn_threaded(state_with(env)).await;

    let (_, body) = get_json(&format!("{}/api/health", base)).await;
    assert_eq!(body["instance_id"], "unknown");
    assert_eq!(body["region"], "unknown");
}

#[tokio::test]
async fn test_health_has_exactly_four_keys() {
    let base = spawn_threaded(state_with(identity_env())).await;

    let response = reqwest::get(format!("{}/api/health", base)).await.unwrap();
    assert!(response.headers().get("cache-control").is_none());
    assert!(response.headers().contains_key("x-request-id"));

    let body: Value = response.json().await.unwrap();
    let object = body.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["instance_id", "region", "status", "timestamp"]);
    assert_eq!(object["status"], "healthy");
}

#[tokio::test]
async fn test_health_timestamps_non_decreasing() {
    let config = AppConfig::default();
    let tera = init_templates(&config.templates).unwrap();
    let state = AppState::with_sources(
        config,
        tera,
        Arc::new(StaticEnv::new()),
        Arc::new(SystemClock),
    );
    let base = spawn_threaded(state).await;

    let parse = |body: &Value| {
        NaiveDateTime::parse_from_str(body["timestamp"].as_str().unwrap(), "%Y-%m-%dT%H:%M:%S%.f")
            .expect("timestamp is not ISO-8601")
    };

    let (_, first) = get_json(&format!("{}/api/health", base)).await;
    let (_, second) = get_json(&format!("{}/api/health", base)).await;
    assert!(parse(&second) >= parse(&first));
}

#[tokio::test]
async fn test_info_is_byte_identical() {
    let base = spawn_threaded(state_with(StaticEnv::new())).await;
    let url = format!("{}/api/info", base);

    let first = reqwest::get(&url).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert!(first.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(
        first.headers()["cache-control"].to_str().unwrap(),
        "public, max-age=300"
    );
    let first = first.text().await.unwrap();

    let second = reqwest::get(&url).await.unwrap().text().await.unwrap();
    assert_eq!(first, INFO_BODY);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let base = spawn_threaded(state_with(StaticEnv::new())).await;

    let response = reqwest::get(format!("{}/nonexistent-path", base)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.text().await.unwrap().contains("Not Found"));
}

#[tokio::test]
async fn test_wrong_method_is_not_allowed() {
    let base = spawn_threaded(state_with(StaticEnv::new())).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/health", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_health_requests() {
    let base = spawn_threaded(state_with(identity_env())).await;
    let client = reqwest::Client::new();

    let mut requests = JoinSet::new();
    for _ in 0..50 {
        let client = client.clone();
        let url = format!("{}/api/health", base);
        requests.spawn(async move {
            let response = client.get(url).send().await.unwrap();
            let status = response.status();
            let body: Value = response.json().await.unwrap();
            (status, body)
        });
    }

    let mut completed = 0;
    while let Some(result) = requests.join_next().await {
        let (status, body) = result.unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["instance_id"], "i-0123abc");
        assert_eq!(body["region"], "us-east-1");
        assert_eq!(body["timestamp"], "2024-06-01T12:30:45.123456");
        completed += 1;
    }
    assert_eq!(completed, 50);
}

#[tokio::test]
async fn test_development_server_serves_same_routes() {
    let threaded = spawn_threaded(state_with(identity_env())).await;
    let development = spawn_development(state_with(identity_env())).await;

    for path in ["/api/health", "/api/info"] {
        let (threaded_status, threaded_body) = get_json(&format!("{}{}", threaded, path)).await;
        let (dev_status, dev_body) = get_json(&format!("{}{}", development, path)).await;
        assert_eq!(threaded_status, dev_status);
        assert_eq!(threaded_body, dev_body);
    }

    let response = reqwest::get(format!("{}/missing", development)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
