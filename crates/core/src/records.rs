//! Normalization of raw upstream JSON into canonical records.
//!
//! The upstream API is not fully schema-stable: the same field shows up as
//! `planetIndex`, `planet_index` or nested under `planet.index` depending on
//! the resource and the API revision. Every alias is resolved here, once, so
//! persistence code only ever sees canonical fields. A record that lacks a
//! required identifier is rejected with [`CoreError::MalformedRecord`] and the
//! caller skips it.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;

/// Event type stored when the upstream record carries none.
pub const DEFAULT_EVENT_TYPE: &str = "unknown";

const PLANET_INDEX_KEYS: &[&str] = &["planetIndex", "planet_index"];
const EVENT_TYPE_KEYS: &[&str] = &["eventType", "event_type"];
const EXPIRES_AT_KEYS: &[&str] = &["expiresAt", "expires_at"];

// ---------------------------------------------------------------------------
// Canonical records
// ---------------------------------------------------------------------------

/// A planet status snapshot keyed by planet index.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetRecord {
    pub planet_index: DbId,
    pub data: Value,
}

/// A campaign with its owning planet and optional expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignRecord {
    pub campaign_id: DbId,
    pub planet_index: DbId,
    pub expires_at: Option<String>,
    pub data: Value,
}

/// A Major Order.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentRecord {
    pub assignment_id: DbId,
    pub data: Value,
}

/// A news dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchRecord {
    pub dispatch_id: DbId,
    pub published: Option<String>,
    pub data: Value,
}

/// An event attached to a planet (defense, storm, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetEventRecord {
    pub event_id: DbId,
    pub planet_index: DbId,
    pub event_type: String,
    pub data: Value,
}

impl PlanetRecord {
    pub fn from_upstream(value: &Value) -> Result<Self, CoreError> {
        let planet_index = int_field(value, &["index"]).ok_or(CoreError::MalformedRecord {
            kind: "planet",
            field: "index",
        })?;
        Ok(Self {
            planet_index,
            data: value.clone(),
        })
    }
}

impl CampaignRecord {
    pub fn from_upstream(value: &Value) -> Result<Self, CoreError> {
        let campaign_id = int_field(value, &["id"]).ok_or(CoreError::MalformedRecord {
            kind: "campaign",
            field: "id",
        })?;
        let planet_index = planet_index(value).ok_or(CoreError::MalformedRecord {
            kind: "campaign",
            field: "planet index",
        })?;
        Ok(Self {
            campaign_id,
            planet_index,
            expires_at: str_field(value, EXPIRES_AT_KEYS).map(str::to_string),
            data: value.clone(),
        })
    }
}

impl AssignmentRecord {
    pub fn from_upstream(value: &Value) -> Result<Self, CoreError> {
        let assignment_id = int_field(value, &["id"]).ok_or(CoreError::MalformedRecord {
            kind: "assignment",
            field: "id",
        })?;
        Ok(Self {
            assignment_id,
            data: value.clone(),
        })
    }
}

impl DispatchRecord {
    pub fn from_upstream(value: &Value) -> Result<Self, CoreError> {
        let dispatch_id = int_field(value, &["id"]).ok_or(CoreError::MalformedRecord {
            kind: "dispatch",
            field: "id",
        })?;
        Ok(Self {
            dispatch_id,
            published: str_field(value, &["published"]).map(str::to_string),
            data: value.clone(),
        })
    }
}

impl PlanetEventRecord {
    pub fn from_upstream(value: &Value) -> Result<Self, CoreError> {
        let event_id = int_field(value, &["id"]).ok_or(CoreError::MalformedRecord {
            kind: "planet event",
            field: "id",
        })?;
        let planet_index = planet_index(value).ok_or(CoreError::MalformedRecord {
            kind: "planet event",
            field: "planet index",
        })?;
        let event_type = str_field(value, EVENT_TYPE_KEYS)
            .unwrap_or(DEFAULT_EVENT_TYPE)
            .to_string();
        Ok(Self {
            event_id,
            planet_index,
            event_type,
            data: value.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Resolve a planet index from `planet.index`, `planetIndex` or `planet_index`.
pub fn planet_index(value: &Value) -> Option<DbId> {
    value
        .get("planet")
        .and_then(|planet| planet.get("index"))
        .and_then(Value::as_i64)
        .or_else(|| int_field(value, PLANET_INDEX_KEYS))
}

/// First integer value found under any of `keys`. JSON `null` counts as absent.
fn int_field(value: &Value, keys: &[&str]) -> Option<DbId> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_i64))
}

fn str_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
