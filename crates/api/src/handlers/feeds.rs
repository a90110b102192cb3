//! Handlers for the cached feeds: assignments, dispatches and planet events.
//!
//! Reads come from the cache only. A cache holding nothing is a 404; a
//! filter that removes every row is an empty 200.

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use hc_core::listing::{assignment_is_active, dispatch_matches, SortOrder};
use serde_json::Value;

use super::collected;
use crate::error::{AppError, AppResult};
use crate::query::{AssignmentParams, DispatchParams, PlanetEventParams, FEED_LIMIT};
use crate::response::RefreshResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

/// GET /api/assignments?limit=&sort=&active_only=
pub async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<AssignmentParams>,
) -> AppResult<Json<Vec<Value>>> {
    let limit = FEED_LIMIT.resolve(params.limit)?;

    if !params.active_only {
        let page = state.store.get_latest_assignments(Some(limit), params.sort).await;
        return Ok(Json(collected(page, "assignment")?));
    }

    let all = collected(
        state.store.get_latest_assignments(None, params.sort).await,
        "assignment",
    )?;
    let now = Utc::now();
    let active = all
        .into_iter()
        .filter(|assignment| assignment_is_active(assignment, now))
        .take(limit as usize)
        .collect();
    Ok(Json(active))
}

/// POST /api/assignments/refresh
pub async fn refresh_assignments(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse<Vec<Value>>>> {
    let assignments = state.query.refresh_assignments().await.ok_or_else(|| {
        AppError::UpstreamFailed("Failed to fetch assignments from upstream API".into())
    })?;
    Ok(Json(RefreshResponse::ok(assignments)))
}

// ---------------------------------------------------------------------------
// Dispatches
// ---------------------------------------------------------------------------

/// GET /api/dispatches?limit=&sort=&search=
pub async fn list_dispatches(
    State(state): State<AppState>,
    Query(params): Query<DispatchParams>,
) -> AppResult<Json<Vec<Value>>> {
    let limit = FEED_LIMIT.resolve(params.limit)?;
    let search = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let Some(needle) = search else {
        let page = state.store.get_latest_dispatches(Some(limit), params.sort).await;
        return Ok(Json(collected(page, "dispatch")?));
    };

    let all = collected(
        state.store.get_latest_dispatches(None, params.sort).await,
        "dispatch",
    )?;
    let matching = all
        .into_iter()
        .filter(|dispatch| dispatch_matches(dispatch, needle))
        .take(limit as usize)
        .collect();
    Ok(Json(matching))
}

/// POST /api/dispatches/refresh
pub async fn refresh_dispatches(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse<Vec<Value>>>> {
    let dispatches = state.query.refresh_dispatches().await.ok_or_else(|| {
        AppError::UpstreamFailed("Failed to fetch dispatches from upstream API".into())
    })?;
    Ok(Json(RefreshResponse::ok(dispatches)))
}

// ---------------------------------------------------------------------------
// Planet events
// ---------------------------------------------------------------------------

/// GET /api/planet-events?limit=&sort=&planet_index=
pub async fn list_planet_events(
    State(state): State<AppState>,
    Query(params): Query<PlanetEventParams>,
) -> AppResult<Json<Vec<Value>>> {
    let limit = FEED_LIMIT.resolve(params.limit)?;
    let events = state
        .store
        .get_latest_planet_events(Some(limit), params.sort, params.planet_index)
        .await;

    if events.is_empty() && params.planet_index.is_some() {
        // Distinguish "nothing on this planet" from "nothing collected".
        let any = state
            .store
            .get_latest_planet_events(Some(1), SortOrder::Newest, None)
            .await;
        collected(any, "planet event")?;
        return Ok(Json(events));
    }

    Ok(Json(collected(events, "planet event")?))
}

/// POST /api/planet-events/refresh
pub async fn refresh_planet_events(
    State(state): State<AppState>,
) -> AppResult<Json<RefreshResponse<Vec<Value>>>> {
    let events = state.query.refresh_planet_events().await.ok_or_else(|| {
        AppError::UpstreamFailed("Failed to fetch planet events from upstream API".into())
    })?;
    Ok(Json(RefreshResponse::ok(events)))
}
