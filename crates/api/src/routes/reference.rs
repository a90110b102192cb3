use axum::routing::get;
use axum::Router;

use crate::handlers::reference;
use crate::state::AppState;

/// Derived reference data, merged directly into `/api`.
///
/// ```text
/// GET    /factions    -> list_factions
/// GET    /biomes      -> list_biomes
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/factions", get(reference::list_factions))
        .route("/biomes", get(reference::list_biomes))
}
