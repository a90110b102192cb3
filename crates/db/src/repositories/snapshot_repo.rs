//! Repositories for the append-only `war_status` and `statistics` tables.
//!
//! Both tables share one shape, so the queries live in a single generic
//! implementation parameterized by table name.

use hc_core::types::Timestamp;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::SqlitePool;

use super::sql_limit;
use crate::models::snapshot::SnapshotRow;

/// Column list for snapshot SELECT queries.
const COLUMNS: &str = "id, data, recorded_at";

async fn insert(
    pool: &SqlitePool,
    table: &str,
    data: &Value,
    recorded_at: Timestamp,
) -> Result<SnapshotRow, sqlx::Error> {
    let query = format!(
        "INSERT INTO {table} (data, recorded_at) VALUES (?, ?) RETURNING {COLUMNS}"
    );
    sqlx::query_as::<_, SnapshotRow>(&query)
        .bind(Json(data))
        .bind(recorded_at)
        .fetch_one(pool)
        .await
}

async fn latest(pool: &SqlitePool, table: &str) -> Result<Option<SnapshotRow>, sqlx::Error> {
    let query = format!(
        "SELECT {COLUMNS} FROM {table} ORDER BY recorded_at DESC, id DESC LIMIT 1"
    );
    sqlx::query_as::<_, SnapshotRow>(&query)
        .fetch_optional(pool)
        .await
}

async fn history(
    pool: &SqlitePool,
    table: &str,
    limit: Option<i64>,
) -> Result<Vec<SnapshotRow>, sqlx::Error> {
    let query = format!(
        "SELECT {COLUMNS} FROM {table} ORDER BY recorded_at DESC, id DESC LIMIT ?"
    );
    sqlx::query_as::<_, SnapshotRow>(&query)
        .bind(sql_limit(limit))
        .fetch_all(pool)
        .await
}

/// Provides query operations for the `war_status` log.
pub struct WarStatusRepo;

impl WarStatusRepo {
    const TABLE: &'static str = "war_status";

    /// Append a war status payload.
    pub async fn insert(
        pool: &SqlitePool,
        data: &Value,
        recorded_at: Timestamp,
    ) -> Result<SnapshotRow, sqlx::Error> {
        insert(pool, Self::TABLE, data, recorded_at).await
    }

    /// Most recently recorded war status, if any.
    pub async fn latest(pool: &SqlitePool) -> Result<Option<SnapshotRow>, sqlx::Error> {
        latest(pool, Self::TABLE).await
    }

    /// Newest-first history, optionally limited.
    pub async fn history(
        pool: &SqlitePool,
        limit: Option<i64>,
    ) -> Result<Vec<SnapshotRow>, sqlx::Error> {
        history(pool, Self::TABLE, limit).await
    }
}

/// Provides query operations for the `statistics` log.
pub struct StatisticsRepo;

impl StatisticsRepo {
    const TABLE: &'static str = "statistics";

    /// Append a statistics payload.
    pub async fn insert(
        pool: &SqlitePool,
        data: &Value,
        recorded_at: Timestamp,
    ) -> Result<SnapshotRow, sqlx::Error> {
        insert(pool, Self::TABLE, data, recorded_at).await
    }

    pub async fn latest(pool: &SqlitePool) -> Result<Option<SnapshotRow>, sqlx::Error> {
        latest(pool, Self::TABLE).await
    }

    pub async fn history(
        pool: &SqlitePool,
        limit: Option<i64>,
    ) -> Result<Vec<SnapshotRow>, sqlx::Error> {
        history(pool, Self::TABLE, limit).await
    }
}
