//! Upserted upstream feeds: assignments, dispatches and planet events.

use hc_core::types::{DbId, Timestamp};
use serde_json::Value;
use sqlx::types::Json;
use sqlx::FromRow;

/// A Major Order, upserted by `assignment_id`.
#[derive(Debug, Clone, FromRow)]
pub struct AssignmentRow {
    pub id: DbId,
    pub assignment_id: DbId,
    pub data: Json<Value>,
    pub recorded_at: Timestamp,
}

/// A news dispatch, upserted by `dispatch_id`.
#[derive(Debug, Clone, FromRow)]
pub struct DispatchRow {
    pub id: DbId,
    pub dispatch_id: DbId,
    pub published: Option<String>,
    pub data: Json<Value>,
    pub recorded_at: Timestamp,
}

/// A planet event, upserted by `event_id`.
#[derive(Debug, Clone, FromRow)]
pub struct PlanetEventRow {
    pub id: DbId,
    pub event_id: DbId,
    pub planet_index: DbId,
    pub event_type: String,
    pub data: Json<Value>,
    pub recorded_at: Timestamp,
}
