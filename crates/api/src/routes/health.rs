use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

/// Service metadata at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health::service_info))
}
