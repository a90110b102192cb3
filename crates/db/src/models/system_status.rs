use hc_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Key under which the upstream availability flag is stored.
pub const UPSTREAM_AVAILABLE_KEY: &str = "upstream_api_available";

/// A single key/value entry in `system_status`.
#[derive(Debug, Clone, FromRow)]
pub struct SystemStatusEntry {
    pub id: DbId,
    pub key: String,
    pub value: Option<String>,
    pub recorded_at: Timestamp,
}
