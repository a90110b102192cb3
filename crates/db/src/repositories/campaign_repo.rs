//! Repository for the `campaigns` table (upserted by `campaign_id`).

use hc_core::campaign::CampaignStatus;
use hc_core::records::CampaignRecord;
use hc_core::types::Timestamp;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::campaign::CampaignRow;

/// Column list for `campaigns` SELECT queries.
const COLUMNS: &str = "id, campaign_id, planet_index, status, expires_at, data, recorded_at";

/// Provides query operations for campaigns.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert or replace a campaign by its upstream id.
    pub async fn upsert(
        conn: &mut SqliteConnection,
        record: &CampaignRecord,
        status: CampaignStatus,
        recorded_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO campaigns \
                (campaign_id, planet_index, status, expires_at, data, recorded_at) \
             VALUES (?, ?, ?, ?, ?, ?) \
             ON CONFLICT (campaign_id) DO UPDATE SET \
                planet_index = excluded.planet_index, \
                status = excluded.status, \
                expires_at = excluded.expires_at, \
                data = excluded.data, \
                recorded_at = excluded.recorded_at",
        )
        .bind(record.campaign_id)
        .bind(record.planet_index)
        .bind(status.as_str())
        .bind(record.expires_at.as_deref())
        .bind(Json(&record.data))
        .bind(recorded_at)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Campaigns whose persisted status matches, ordered by campaign id.
    pub async fn list_by_status(
        pool: &SqlitePool,
        status: CampaignStatus,
    ) -> Result<Vec<CampaignRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaigns WHERE status = ? ORDER BY campaign_id ASC"
        );
        sqlx::query_as::<_, CampaignRow>(&query)
            .bind(status.as_str())
            .fetch_all(pool)
            .await
    }

    /// The most recent row per campaign id.
    ///
    /// `campaign_id` is unique, so this is every row.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<CampaignRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns ORDER BY campaign_id ASC");
        sqlx::query_as::<_, CampaignRow>(&query)
            .fetch_all(pool)
            .await
    }
}
