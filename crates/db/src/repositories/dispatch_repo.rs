//! Repository for the `dispatches` table (upserted by `dispatch_id`).

use hc_core::listing::SortOrder;
use hc_core::records::DispatchRecord;
use hc_core::types::Timestamp;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

use super::sql_limit;
use crate::models::feed::DispatchRow;

const COLUMNS: &str = "id, dispatch_id, published, data, recorded_at";

/// Provides query operations for news dispatches.
pub struct DispatchRepo;

impl DispatchRepo {
    pub async fn upsert(
        conn: &mut SqliteConnection,
        record: &DispatchRecord,
        recorded_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO dispatches (dispatch_id, published, data, recorded_at) \
             VALUES (?, ?, ?, ?) \
             ON CONFLICT (dispatch_id) DO UPDATE SET \
                published = excluded.published, \
                data = excluded.data, \
                recorded_at = excluded.recorded_at",
        )
        .bind(record.dispatch_id)
        .bind(record.published.as_deref())
        .bind(Json(&record.data))
        .bind(recorded_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Dispatches ordered by `published`, falling back to insertion order.
    ///
    /// Rows without a `published` value always sort last.
    pub async fn list(
        pool: &SqlitePool,
        limit: Option<i64>,
        order: SortOrder,
    ) -> Result<Vec<DispatchRow>, sqlx::Error> {
        let ord = order.sql();
        let query = format!(
            "SELECT {COLUMNS} FROM dispatches \
             ORDER BY published IS NULL, published {ord}, recorded_at {ord}, id {ord} \
             LIMIT ?"
        );
        sqlx::query_as::<_, DispatchRow>(&query)
            .bind(sql_limit(limit))
            .fetch_all(pool)
            .await
    }
}
