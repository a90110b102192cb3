//! Repository for the `system_status` key/value table.

use hc_core::types::Timestamp;
use sqlx::SqlitePool;

use crate::models::system_status::SystemStatusEntry;

/// Provides query operations for system status flags.
pub struct SystemStatusRepo;

impl SystemStatusRepo {
    /// Set `key` to `value`, replacing any previous value.
    pub async fn upsert(
        pool: &SqlitePool,
        key: &str,
        value: &str,
        recorded_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO system_status (key, value, recorded_at) VALUES (?, ?, ?) \
             ON CONFLICT (key) DO UPDATE SET \
                value = excluded.value, \
                recorded_at = excluded.recorded_at",
        )
        .bind(key)
        .bind(value)
        .bind(recorded_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn get(pool: &SqlitePool, key: &str) -> Result<Option<SystemStatusEntry>, sqlx::Error> {
        sqlx::query_as::<_, SystemStatusEntry>(
            "SELECT id, key, value, recorded_at FROM system_status WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(pool)
        .await
    }
}
