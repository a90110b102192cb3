use axum::routing::get;
use axum::Router;

use crate::handlers::planets;
use crate::state::AppState;

/// Routes mounted at `/planets`.
///
/// ```text
/// GET    /                   -> list_planets
/// GET    /{index}            -> get_planet
/// GET    /{index}/history    -> get_planet_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(planets::list_planets))
        .route("/{index}", get(planets::get_planet))
        .route("/{index}/history", get(planets::get_planet_history))
}
