//! Handlers for `/api/planets`.

use axum::extract::{Path, Query, State};
use axum::Json;
use hc_core::types::DbId;
use hc_db::models::planet::PlanetHistoryEntry;
use serde_json::Value;

use super::{available, collected};
use crate::error::{AppError, AppResult};
use crate::query::{LimitParams, PLANET_HISTORY_LIMIT};
use crate::state::AppState;

fn check_index(index: DbId) -> AppResult<DbId> {
    if index < 0 {
        return Err(AppError::BadRequest(format!(
            "Planet index must be non-negative, got {index}"
        )));
    }
    Ok(index)
}

/// GET /api/planets
///
/// Live planets, falling back to the latest cached snapshot.
pub async fn list_planets(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    available(state.query.planets().await, "planet")
}

/// GET /api/planets/{index}
///
/// One planet, live, falling back to its latest cached status.
pub async fn get_planet(
    State(state): State<AppState>,
    Path(index): Path<DbId>,
) -> AppResult<Json<Value>> {
    let index = check_index(index)?;
    available(state.query.planet(index).await, &format!("planet {index}"))
}

/// GET /api/planets/{index}/history?limit=
pub async fn get_planet_history(
    State(state): State<AppState>,
    Path(index): Path<DbId>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<PlanetHistoryEntry>>> {
    let index = check_index(index)?;
    let limit = PLANET_HISTORY_LIMIT.resolve(params.limit)?;
    let history = state.store.get_planet_status_history(index, Some(limit)).await;
    Ok(Json(collected(history, &format!("planet {index} history"))?))
}
