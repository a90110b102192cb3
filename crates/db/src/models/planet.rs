//! Planet status history (append-only, one row per planet per cycle).

use hc_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct PlanetStatusRow {
    pub id: DbId,
    pub planet_index: DbId,
    pub data: Json<Value>,
    pub recorded_at: Timestamp,
}

/// Per-planet history entry returned by `/api/planets/{index}/history`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanetHistoryEntry {
    pub planet_index: DbId,
    pub data: Value,
    pub recorded_at: Timestamp,
}

impl From<PlanetStatusRow> for PlanetHistoryEntry {
    fn from(row: PlanetStatusRow) -> Self {
        Self {
            planet_index: row.planet_index,
            data: row.data.0,
            recorded_at: row.recorded_at,
        }
    }
}
