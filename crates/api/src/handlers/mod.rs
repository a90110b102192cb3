pub mod campaigns;
pub mod feeds;
pub mod health;
pub mod planets;
pub mod reference;
pub mod statistics;
pub mod war;

use axum::Json;
use hc_collector::Lookup;

use crate::error::{AppError, AppResult};

/// Serve a live-or-cached value, or 503 when neither exists.
pub(crate) fn available<T>(lookup: Lookup<T>, resource: &str) -> AppResult<Json<T>> {
    lookup.into_option().map(Json).ok_or_else(|| {
        AppError::ServiceUnavailable(format!(
            "No {resource} data available from upstream API or cache"
        ))
    })
}

/// 404 when nothing has been collected for `resource`.
pub(crate) fn collected<T>(items: Vec<T>, resource: &str) -> AppResult<Vec<T>> {
    if items.is_empty() {
        return Err(AppError::NotFound(format!("No {resource} data available")));
    }
    Ok(items)
}
