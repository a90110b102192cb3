//! Handlers for `/api/campaigns`.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::{available, collected};
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/campaigns
///
/// Live campaigns, falling back to the cached snapshot.
pub async fn list_campaigns(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    available(state.query.campaigns().await, "campaign")
}

/// GET /api/campaigns/active
///
/// Cached campaigns that have not expired.
pub async fn list_active_campaigns(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    let campaigns = state.store.get_active_campaigns().await;
    Ok(Json(collected(campaigns, "active campaign")?))
}
