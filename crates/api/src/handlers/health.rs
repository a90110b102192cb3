//! Service health and metadata.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub collector_running: bool,
    /// `online` when the last collection cycle succeeded.
    pub upstream_api: &'static str,
    pub db_healthy: bool,
}

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = hc_db::health_check(state.store.pool()).await.is_ok();
    let upstream_online = state.store.get_upstream_status().await;

    Json(HealthResponse {
        status: if db_healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        collector_running: state.collector.is_running(),
        upstream_api: if upstream_online { "online" } else { "offline" },
        db_healthy,
    })
}

/// Service metadata returned at `/`.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub endpoints: Vec<&'static str>,
}

const ENDPOINTS: &[&str] = &[
    "GET /api/health",
    "GET /api/war/status",
    "POST /api/war/status/refresh",
    "GET /api/campaigns",
    "GET /api/campaigns/active",
    "GET /api/assignments",
    "POST /api/assignments/refresh",
    "GET /api/dispatches",
    "POST /api/dispatches/refresh",
    "GET /api/planet-events",
    "POST /api/planet-events/refresh",
    "GET /api/planets",
    "GET /api/planets/{index}",
    "GET /api/planets/{index}/history",
    "GET /api/statistics",
    "GET /api/statistics/history",
    "POST /api/statistics/refresh",
    "GET /api/factions",
    "GET /api/biomes",
];

/// GET /
pub async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Hell Divers 2 API",
        version: env!("CARGO_PKG_VERSION"),
        description: "Cached Helldivers 2 war data with live upstream fallback",
        endpoints: ENDPOINTS.to_vec(),
    })
}
