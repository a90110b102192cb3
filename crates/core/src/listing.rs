//! Ordering and filtering for cached list endpoints.

use serde::Deserialize;
use serde_json::Value;

use crate::campaign::parse_expiry;
use crate::types::Timestamp;

/// Requested ordering of a cached list (`?sort=newest|oldest`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    /// SQL keyword for this ordering.
    pub fn sql(self) -> &'static str {
        match self {
            Self::Newest => "DESC",
            Self::Oldest => "ASC",
        }
    }
}

/// An assignment is active unless it is flagged `expired` or its
/// `expiration` has passed.
pub fn assignment_is_active(assignment: &Value, now: Timestamp) -> bool {
    if assignment.get("expired").and_then(Value::as_bool) == Some(true) {
        return false;
    }
    match assignment
        .get("expiration")
        .and_then(Value::as_str)
        .and_then(parse_expiry)
    {
        Some(expiration) => expiration > now,
        None => true,
    }
}

/// Case-insensitive substring match over a dispatch's top-level string fields.
///
/// An empty needle matches everything.
pub fn dispatch_matches(dispatch: &Value, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    dispatch
        .as_object()
        .map(|fields| {
            fields
                .values()
                .filter_map(Value::as_str)
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .unwrap_or(false)
}
