//! Handlers for `/api/statistics`.

use axum::extract::{Query, State};
use axum::Json;
use hc_db::models::snapshot::HistoryEntry;
use serde_json::Value;

use super::collected;
use crate::error::{AppError, AppResult};
use crate::query::{LimitParams, STATISTICS_HISTORY_LIMIT};
use crate::response::RefreshResponse;
use crate::state::AppState;

/// GET /api/statistics
pub async fn get_statistics(State(state): State<AppState>) -> AppResult<Json<Value>> {
    state
        .store
        .get_latest_statistics()
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No statistics data available".into()))
}

/// GET /api/statistics/history?limit=
pub async fn get_statistics_history(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let limit = STATISTICS_HISTORY_LIMIT.resolve(params.limit)?;
    let history = state.store.get_statistics_history(Some(limit)).await;
    Ok(Json(collected(history, "statistics history")?))
}

/// POST /api/statistics/refresh
pub async fn refresh_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse<Value>>> {
    let statistics = state.query.refresh_statistics().await.ok_or_else(|| {
        AppError::UpstreamFailed("Failed to fetch statistics from upstream API".into())
    })?;
    Ok(Json(RefreshResponse::ok(statistics)))
}
