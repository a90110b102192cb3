#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;

use hc_api::config::{Environment, ServerConfig};
use hc_api::router::build_app_router;
use hc_api::state::AppState;
use hc_db::CacheStore;
use hc_upstream::{BackoffConfig, UpstreamClient, UpstreamConfig};

/// Nothing listens on the discard port, so connections are refused at once.
pub const UNREACHABLE_UPSTREAM: &str = "http://127.0.0.1:9";

/// Build a test `ServerConfig` pointed at `upstream_base_url`.
///
/// The upstream client does not pace requests and backs off in milliseconds.
pub fn test_config(upstream_base_url: &str) -> ServerConfig {
    let mut config = ServerConfig::from_lookup(|key| match key {
        "APP_ENV" => Some("testing".into()),
        _ => None,
    });
    assert_eq!(config.environment, Environment::Testing);

    config.host = "127.0.0.1".into();
    config.port = 0;
    config.request_timeout_secs = 30;
    config.upstream = UpstreamConfig {
        base_url: upstream_base_url.to_string(),
        timeout: Duration::from_secs(5),
        request_delay: Duration::ZERO,
        backoff: BackoffConfig {
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            multiplier: 2.0,
            max_retries: 2,
        },
        ..Default::default()
    };
    config
}

/// Application state over `pool`, talking to `upstream_base_url`.
pub fn build_test_state(pool: SqlitePool, upstream_base_url: &str) -> AppState {
    let config = test_config(upstream_base_url);
    let client = UpstreamClient::new(config.upstream.clone()).unwrap();
    AppState::new(CacheStore::new(pool), Arc::new(client), config)
}

/// Build the full application router with all middleware layers.
pub fn build_test_app(pool: SqlitePool, upstream_base_url: &str) -> Router {
    let state = build_test_state(pool, upstream_base_url);
    let config = state.config.as_ref().clone();
    build_app_router(state, &config)
}

/// Router whose upstream is unreachable, so only cached data is served.
pub fn build_offline_app(pool: SqlitePool) -> Router {
    build_test_app(pool, UNREACHABLE_UPSTREAM)
}

pub async fn send(app: Router, method: Method, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// `id` fields of a JSON array, in order.
pub fn ids(items: &Value) -> Vec<i64> {
    items
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}
