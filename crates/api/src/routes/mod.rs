pub mod campaigns;
pub mod feeds;
pub mod health;
pub mod planets;
pub mod reference;
pub mod statistics;
pub mod war;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /health                          service, collector and upstream health
///
/// /war/status                      latest cached war status
/// /war/status/refresh              live fetch + persist (POST)
///
/// /campaigns                       live, falling back to cached snapshot
/// /campaigns/active                cached, unexpired
///
/// /assignments                     cached (?limit, sort, active_only)
/// /assignments/refresh             live fetch + persist (POST)
/// /dispatches                      cached (?limit, sort, search)
/// /dispatches/refresh              live fetch + persist (POST)
/// /planet-events                   cached (?limit, sort, planet_index)
/// /planet-events/refresh           live fetch + persist (POST)
///
/// /planets                         live, falling back to cached snapshot
/// /planets/{index}                 live, falling back to latest status
/// /planets/{index}/history         cached (?limit)
///
/// /statistics                      latest cached statistics
/// /statistics/history              cached (?limit)
/// /statistics/refresh              live fetch + persist (POST)
///
/// /factions                        live, falling back to cached war status
/// /biomes                          live, falling back to cached planets
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/war", war::router())
        .nest("/campaigns", campaigns::router())
        .nest("/assignments", feeds::assignments_router())
        .nest("/dispatches", feeds::dispatches_router())
        .nest("/planet-events", feeds::planet_events_router())
        .nest("/planets", planets::router())
        .nest("/statistics", statistics::router())
        .merge(reference::router())
}
