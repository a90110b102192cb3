//! Query parameter types and range checks shared by list endpoints.

use std::ops::RangeInclusive;

use hc_core::error::CoreError;
use hc_core::listing::SortOrder;
use hc_core::types::DbId;
use serde::Deserialize;

use crate::error::AppError;

/// Bounds and default of a `limit` parameter.
#[derive(Debug, Clone)]
pub struct LimitRange {
    pub range: RangeInclusive<i64>,
    pub default: i64,
}

/// Assignments, dispatches and planet events.
pub const FEED_LIMIT: LimitRange = LimitRange { range: 1..=100, default: 10 };

pub const PLANET_HISTORY_LIMIT: LimitRange = LimitRange { range: 1..=100, default: 10 };

pub const STATISTICS_HISTORY_LIMIT: LimitRange = LimitRange { range: 1..=1000, default: 100 };

impl LimitRange {
    /// Apply the default and reject values outside the range.
    pub fn resolve(&self, limit: Option<i64>) -> Result<i64, AppError> {
        let limit = limit.unwrap_or(self.default);
        if !self.range.contains(&limit) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "limit must be between {} and {}",
                self.range.start(),
                self.range.end()
            ))));
        }
        Ok(limit)
    }
}

/// `?limit=` only.
#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

/// `GET /api/assignments` parameters.
#[derive(Debug, Deserialize)]
pub struct AssignmentParams {
    pub limit: Option<i64>,
    #[serde(default)]
    pub sort: SortOrder,
    #[serde(default)]
    pub active_only: bool,
}

/// `GET /api/dispatches` parameters.
#[derive(Debug, Deserialize)]
pub struct DispatchParams {
    pub limit: Option<i64>,
    #[serde(default)]
    pub sort: SortOrder,
    pub search: Option<String>,
}

/// `GET /api/planet-events` parameters.
#[derive(Debug, Deserialize)]
pub struct PlanetEventParams {
    pub limit: Option<i64>,
    #[serde(default)]
    pub sort: SortOrder,
    pub planet_index: Option<DbId>,
}
