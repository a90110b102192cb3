use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use hc_upstream::{BackoffConfig, GameDataSource, UpstreamClient, UpstreamConfig};
use httpmock::prelude::*;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Client with no pacing and millisecond backoff.
fn fast_client(base_url: String) -> UpstreamClient {
    UpstreamClient::new(UpstreamConfig {
        base_url,
        timeout: Duration::from_secs(5),
        request_delay: Duration::ZERO,
        backoff: BackoffConfig {
            initial_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(50),
            multiplier: 2.0,
            max_retries: 3,
        },
        client_name: "test-client".into(),
        contact: "tests@example.com".into(),
    })
    .unwrap()
}

/// Fake upstream that answers `/war` with 429 for the first `failures` hits.
async fn spawn_flaky_upstream(failures: usize) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));

    async fn war(State((hits, failures)): State<(Arc<AtomicUsize>, usize)>) -> Response {
        let n = hits.fetch_add(1, Ordering::SeqCst);
        if n < failures {
            StatusCode::TOO_MANY_REQUESTS.into_response()
        } else {
            Json(json!({"war_id": 801})).into_response()
        }
    }

    let app = Router::new()
        .route("/war", get(war))
        .with_state((Arc::clone(&hits), failures));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), hits)
}

// ---------------------------------------------------------------------------
// Success paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn war_status_sends_identifying_headers() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/war")
                .header("user-agent", "High-Command-API/1.0")
                .header("x-super-client", "test-client")
                .header("x-super-contact", "tests@example.com");
            then.status(200).json_body(json!({"war_id": 801}));
        })
        .await;

    let client = fast_client(server.base_url());
    assert_eq!(client.war_status().await, Some(json!({"war_id": 801})));
    mock.assert_async().await;
}

#[tokio::test]
async fn list_resources_use_their_paths() {
    let server = MockServer::start_async().await;
    let paths = ["/planets", "/campaigns", "/assignments", "/dispatches", "/planet-events"];
    for path in paths {
        server
            .mock_async(|when, then| {
                when.method(GET).path(path);
                then.status(200).json_body(json!([{"id": 1, "path": path}]));
            })
            .await;
    }

    let client = fast_client(server.base_url());
    assert_eq!(client.planets().await.unwrap()[0]["path"], "/planets");
    assert_eq!(client.campaigns().await.unwrap()[0]["path"], "/campaigns");
    assert_eq!(client.assignments().await.unwrap()[0]["path"], "/assignments");
    assert_eq!(client.dispatches().await.unwrap()[0]["path"], "/dispatches");
    assert_eq!(client.planet_events().await.unwrap()[0]["path"], "/planet-events");
}

#[tokio::test]
async fn empty_list_is_data_not_absence() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/campaigns");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = fast_client(server.base_url());
    assert_eq!(client.campaigns().await, Some(Vec::new()));
}

#[tokio::test]
async fn single_planet_by_index() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/planets/0");
            then.status(200).json_body(json!({"index": 0, "name": "Super Earth"}));
        })
        .await;

    let client = fast_client(server.base_url());
    assert_eq!(client.planet(0).await.unwrap()["name"], "Super Earth");
}

#[tokio::test]
async fn derived_resources_reuse_war_and_planets() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/war");
            then.status(200).json_body(json!({
                "war_id": 801,
                "statistics": {"missionsWon": 5},
                "factions": ["Humans"]
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/planets");
            then.status(200).json_body(json!([
                {"index": 0, "biome": {"name": "Desert"}},
                {"index": 1, "biome": {"name": "Desert"}},
                {"index": 2, "biome": {"name": "Ice"}}
            ]));
        })
        .await;

    let client = fast_client(server.base_url());
    assert_eq!(client.statistics().await, Some(json!({"missionsWon": 5})));
    assert_eq!(client.factions().await, Some(json!(["Humans"])));
    let biomes = client.biomes().await.unwrap();
    assert_eq!(biomes, vec![json!({"name": "Desert"}), json!({"name": "Ice"})]);
}

// ---------------------------------------------------------------------------
// Failure classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_shape_is_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/war");
            then.status(200).json_body(json!([{"war_id": 1}]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/planets");
            then.status(200).json_body(json!({"index": 0}));
        })
        .await;

    let client = fast_client(server.base_url());
    assert!(client.war_status().await.is_none());
    assert!(client.planets().await.is_none());
    assert!(client.biomes().await.is_none());
}

#[tokio::test]
async fn invalid_json_is_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/dispatches");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let client = fast_client(server.base_url());
    assert!(client.dispatches().await.is_none());
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/war");
            then.status(500).body("boom");
        })
        .await;

    let client = fast_client(server.base_url());
    assert!(client.war_status().await.is_none());
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn not_found_is_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/planets/9999");
            then.status(404);
        })
        .await;

    let client = fast_client(server.base_url());
    assert!(client.planet(9999).await.is_none());
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn connection_failure_is_unavailable() {
    // Bind then drop to get a port nothing listens on.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = fast_client(format!("http://{addr}"));
    assert!(client.war_status().await.is_none());
}

// ---------------------------------------------------------------------------
// Backoff & pacing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rate_limited_then_ok_yields_data() {
    let (base_url, hits) = spawn_flaky_upstream(2).await;
    let client = fast_client(base_url);

    assert_eq!(client.war_status().await, Some(json!({"war_id": 801})));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retries_are_bounded() {
    let (base_url, hits) = spawn_flaky_upstream(usize::MAX).await;
    let client = fast_client(base_url);

    assert!(client.war_status().await.is_none());
    // One initial attempt plus `max_retries`.
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn consecutive_calls_respect_min_interval() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/war");
            then.status(200).json_body(json!({"war_id": 1}));
        })
        .await;

    let client = UpstreamClient::new(UpstreamConfig {
        base_url: server.base_url(),
        request_delay: Duration::from_millis(200),
        ..Default::default()
    })
    .unwrap();

    let started = Instant::now();
    let first: Option<Value> = client.war_status().await;
    let second: Option<Value> = client.war_status().await;
    assert!(first.is_some() && second.is_some());
    assert!(started.elapsed() >= Duration::from_millis(190));
}
