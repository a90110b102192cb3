//! Handlers for the derived reference resources: factions and biomes.

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use super::available;
use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/factions
pub async fn list_factions(State(state): State<AppState>) -> AppResult<Json<Value>> {
    available(state.query.factions().await, "faction")
}

/// GET /api/biomes
pub async fn list_biomes(State(state): State<AppState>) -> AppResult<Json<Vec<Value>>> {
    available(state.query.biomes().await, "biome")
}
