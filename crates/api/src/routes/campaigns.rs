use axum::routing::get;
use axum::Router;

use crate::handlers::campaigns;
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET    /          -> list_campaigns
/// GET    /active    -> list_active_campaigns
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(campaigns::list_campaigns))
        .route("/active", get(campaigns::list_active_campaigns))
}
