use axum::routing::{get, post};
use axum::Router;

use crate::handlers::statistics;
use crate::state::AppState;

/// Routes mounted at `/statistics`.
///
/// ```text
/// GET    /           -> get_statistics
/// GET    /history    -> get_statistics_history
/// POST   /refresh    -> refresh_statistics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(statistics::get_statistics))
        .route("/history", get(statistics::get_statistics_history))
        .route("/refresh", post(statistics::refresh_statistics))
}
