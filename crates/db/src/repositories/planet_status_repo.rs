//! Repository for the `planet_status` table (append-only time-series).

use hc_core::records::PlanetRecord;
use hc_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

use super::sql_limit;
use crate::models::planet::PlanetStatusRow;

/// Column list for `planet_status` SELECT queries.
const COLUMNS: &str = "id, planet_index, data, recorded_at";

/// Provides query operations for planet status history.
pub struct PlanetStatusRepo;

impl PlanetStatusRepo {
    /// Append one planet status row.
    ///
    /// Takes a connection so a whole planets batch can share a transaction.
    pub async fn insert(
        conn: &mut SqliteConnection,
        record: &PlanetRecord,
        recorded_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO planet_status (planet_index, data, recorded_at) VALUES (?, ?, ?)")
            .bind(record.planet_index)
            .bind(Json(&record.data))
            .bind(recorded_at)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Newest-first history for a single planet.
    pub async fn history_for_planet(
        pool: &SqlitePool,
        planet_index: DbId,
        limit: Option<i64>,
    ) -> Result<Vec<PlanetStatusRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM planet_status \
             WHERE planet_index = ? \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT ?"
        );
        sqlx::query_as::<_, PlanetStatusRow>(&query)
            .bind(planet_index)
            .bind(sql_limit(limit))
            .fetch_all(pool)
            .await
    }

    /// Latest row for a single planet.
    pub async fn latest_for_planet(
        pool: &SqlitePool,
        planet_index: DbId,
    ) -> Result<Option<PlanetStatusRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM planet_status \
             WHERE planet_index = ? \
             ORDER BY recorded_at DESC, id DESC \
             LIMIT 1"
        );
        sqlx::query_as::<_, PlanetStatusRow>(&query)
            .bind(planet_index)
            .fetch_optional(pool)
            .await
    }

    /// Every row sharing the most recent `recorded_at`, ordered by planet index.
    pub async fn latest_snapshot(pool: &SqlitePool) -> Result<Vec<PlanetStatusRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM planet_status \
             WHERE recorded_at = (SELECT MAX(recorded_at) FROM planet_status) \
             ORDER BY planet_index ASC, id ASC"
        );
        sqlx::query_as::<_, PlanetStatusRow>(&query)
            .fetch_all(pool)
            .await
    }
}
