//! Route definitions for the cached feeds.
//!
//! Each feed gets its own router: a cached list at `/` and a live refresh
//! at `/refresh`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::feeds;
use crate::state::AppState;

/// Routes mounted at `/assignments`.
///
/// ```text
/// GET    /          -> list_assignments
/// POST   /refresh   -> refresh_assignments
/// ```
pub fn assignments_router() -> Router<AppState> {
    Router::new()
        .route("/", get(feeds::list_assignments))
        .route("/refresh", post(feeds::refresh_assignments))
}

/// Routes mounted at `/dispatches`.
///
/// ```text
/// GET    /          -> list_dispatches
/// POST   /refresh   -> refresh_dispatches
/// ```
pub fn dispatches_router() -> Router<AppState> {
    Router::new()
        .route("/", get(feeds::list_dispatches))
        .route("/refresh", post(feeds::refresh_dispatches))
}

/// Routes mounted at `/planet-events`.
///
/// ```text
/// GET    /          -> list_planet_events
/// POST   /refresh   -> refresh_planet_events
/// ```
pub fn planet_events_router() -> Router<AppState> {
    Router::new()
        .route("/", get(feeds::list_planet_events))
        .route("/refresh", post(feeds::refresh_planet_events))
}
