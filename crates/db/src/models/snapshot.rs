//! Append-only JSON snapshots (`war_status`, `statistics`).

use hc_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// One stored payload from an append-only log table.
#[derive(Debug, Clone, FromRow)]
pub struct SnapshotRow {
    pub id: DbId,
    pub data: Json<Value>,
    pub recorded_at: Timestamp,
}

/// A history entry tagged with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub data: Value,
    pub recorded_at: Timestamp,
}

impl From<SnapshotRow> for HistoryEntry {
    fn from(row: SnapshotRow) -> Self {
        Self {
            data: row.data.0,
            recorded_at: row.recorded_at,
        }
    }
}
