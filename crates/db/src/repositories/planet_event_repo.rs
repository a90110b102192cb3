//! Repository for the `planet_events` table (upserted by `event_id`).

use hc_core::listing::SortOrder;
use hc_core::records::PlanetEventRecord;
use hc_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

use super::sql_limit;
use crate::models::feed::PlanetEventRow;

const COLUMNS: &str = "id, event_id, planet_index, event_type, data, recorded_at";

/// Provides query operations for planet events.
pub struct PlanetEventRepo;

impl PlanetEventRepo {
    pub async fn upsert(
        conn: &mut SqliteConnection,
        record: &PlanetEventRecord,
        recorded_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO planet_events (event_id, planet_index, event_type, data, recorded_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT (event_id) DO UPDATE SET \
                planet_index = excluded.planet_index, \
                event_type = excluded.event_type, \
                data = excluded.data, \
                recorded_at = excluded.recorded_at",
        )
        .bind(record.event_id)
        .bind(record.planet_index)
        .bind(&record.event_type)
        .bind(Json(&record.data))
        .bind(recorded_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Planet events ordered by recording time, optionally for one planet.
    pub async fn list(
        pool: &SqlitePool,
        planet_index: Option<DbId>,
        limit: Option<i64>,
        order: SortOrder,
    ) -> Result<Vec<PlanetEventRow>, sqlx::Error> {
        let ord = order.sql();
        let query = format!(
            "SELECT {COLUMNS} FROM planet_events \
             WHERE (? IS NULL OR planet_index = ?) \
             ORDER BY recorded_at {ord}, id {ord} \
             LIMIT ?"
        );
        sqlx::query_as::<_, PlanetEventRow>(&query)
            .bind(planet_index)
            .bind(planet_index)
            .bind(sql_limit(limit))
            .fetch_all(pool)
            .await
    }
}
