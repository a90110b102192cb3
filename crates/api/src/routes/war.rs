//! Route definitions for the war status resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::war;
use crate::state::AppState;

/// Routes mounted at `/war`.
///
/// ```text
/// GET    /status            -> get_war_status
/// POST   /status/refresh    -> refresh_war_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/status", get(war::get_war_status))
        .route("/status/refresh", post(war::refresh_war_status))
}
