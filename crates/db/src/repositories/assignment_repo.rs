//! Repository for the `assignments` table (upserted by `assignment_id`).

use hc_core::listing::SortOrder;
use hc_core::records::AssignmentRecord;
use hc_core::types::Timestamp;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

use super::sql_limit;
use crate::models::feed::AssignmentRow;

const COLUMNS: &str = "id, assignment_id, data, recorded_at";

/// Provides query operations for Major Orders.
pub struct AssignmentRepo;

impl AssignmentRepo {
    pub async fn upsert(
        conn: &mut SqliteConnection,
        record: &AssignmentRecord,
        recorded_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO assignments (assignment_id, data, recorded_at) VALUES (?, ?, ?) \
             ON CONFLICT (assignment_id) DO UPDATE SET \
                data = excluded.data, \
                recorded_at = excluded.recorded_at",
        )
        .bind(record.assignment_id)
        .bind(Json(&record.data))
        .bind(recorded_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Assignments ordered by when they were last recorded.
    pub async fn list(
        pool: &SqlitePool,
        limit: Option<i64>,
        order: SortOrder,
    ) -> Result<Vec<AssignmentRow>, sqlx::Error> {
        let ord = order.sql();
        let query = format!(
            "SELECT {COLUMNS} FROM assignments \
             ORDER BY recorded_at {ord}, id {ord} \
             LIMIT ?"
        );
        sqlx::query_as::<_, AssignmentRow>(&query)
            .bind(sql_limit(limit))
            .fetch_all(pool)
            .await
    }
}
