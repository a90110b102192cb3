//! Handlers for `/api/war/status`.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::response::RefreshResponse;
use crate::state::AppState;

/// GET /api/war/status
///
/// Latest cached war status.
pub async fn get_war_status(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state
        .store
        .get_latest_war_status()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No war status data available".into()))
}

/// POST /api/war/status/refresh
///
/// Fetch the war status live and persist it.
pub async fn refresh_war_status(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse<Value>>> {
    let war = state.query.refresh_war_status().await.ok_or_else(|| {
        AppError::UpstreamFailed("Failed to fetch war status from upstream API".into())
    })?;
    Ok(Json(RefreshResponse::ok(war)))
}
