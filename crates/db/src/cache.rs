//! The cache contract shared by the collector and the HTTP layer.
//!
//! Every write is one transaction and reports success as a `bool`; every read
//! degrades to `None` or an empty list. Database errors are logged here and
//! never propagated, so one failing resource cannot stall a collection cycle.

use chrono::Utc;
use hc_core::biomes::unique_biomes;
use hc_core::campaign::{self, CampaignStatus};
use hc_core::listing::SortOrder;
use hc_core::records::{
    AssignmentRecord, CampaignRecord, DispatchRecord, PlanetEventRecord, PlanetRecord,
};
use hc_core::types::{DbId, Timestamp};
use serde_json::Value;

use crate::models::planet::PlanetHistoryEntry;
use crate::models::snapshot::HistoryEntry;
use crate::models::system_status::UPSTREAM_AVAILABLE_KEY;
use crate::repositories::{
    AssignmentRepo, CampaignRepo, DispatchRepo, PlanetEventRepo, PlanetStatusRepo,
    StatisticsRepo, SystemStatusRepo, WarStatusRepo,
};
use crate::DbPool;

/// Cached view of the upstream game data.
#[derive(Clone)]
pub struct CacheStore {
    pool: DbPool,
}

/// Log a repository failure and fall back to `default`.
fn logged<T>(op: &'static str, result: Result<T, sqlx::Error>, default: T) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(op, error = %e, "Cache operation failed");
            default
        }
    }
}

/// Normalize a batch, skipping records that lack their identifiers.
pub fn normalize<T>(
    items: &[Value],
    parse: impl Fn(&Value) -> Result<T, hc_core::error::CoreError>,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match parse(item) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed record");
                None
            }
        })
        .collect()
}

impl CacheStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    // -----------------------------------------------------------------------
    // War status & statistics
    // -----------------------------------------------------------------------

    pub async fn save_war_status(&self, data: &Value) -> bool {
        let result = WarStatusRepo::insert(&self.pool, data, Utc::now()).await;
        logged("save_war_status", result.map(|_| true), false)
    }

    pub async fn get_latest_war_status(&self) -> Option<Value> {
        let row = logged("get_latest_war_status", WarStatusRepo::latest(&self.pool).await, None);
        row.map(|row| row.data.0)
    }

    pub async fn get_war_status_history(&self, limit: Option<i64>) -> Vec<HistoryEntry> {
        let rows = logged(
            "get_war_status_history",
            WarStatusRepo::history(&self.pool, limit).await,
            Vec::new(),
        );
        rows.into_iter().map(HistoryEntry::from).collect()
    }

    pub async fn save_statistics(&self, data: &Value) -> bool {
        let result = StatisticsRepo::insert(&self.pool, data, Utc::now()).await;
        logged("save_statistics", result.map(|_| true), false)
    }

    pub async fn get_latest_statistics(&self) -> Option<Value> {
        let row = logged("get_latest_statistics", StatisticsRepo::latest(&self.pool).await, None);
        row.map(|row| row.data.0)
    }

    pub async fn get_statistics_history(&self, limit: Option<i64>) -> Vec<HistoryEntry> {
        let rows = logged(
            "get_statistics_history",
            StatisticsRepo::history(&self.pool, limit).await,
            Vec::new(),
        );
        rows.into_iter().map(HistoryEntry::from).collect()
    }

    // -----------------------------------------------------------------------
    // Planets
    // -----------------------------------------------------------------------

    /// Append the status of a single planet.
    pub async fn save_planet_status(&self, planet_index: DbId, data: &Value) -> bool {
        let record = PlanetRecord {
            planet_index,
            data: data.clone(),
        };
        self.insert_planets(std::slice::from_ref(&record), Utc::now())
            .await
    }

    /// Append a full planets listing as one snapshot.
    ///
    /// Every row in the batch shares a single `recorded_at`, which is what
    /// makes [`get_latest_planets_snapshot`](Self::get_latest_planets_snapshot)
    /// return the whole batch. Planets without an index are skipped.
    pub async fn save_planet_snapshot(&self, planets: &[Value]) -> bool {
        let records = normalize(planets, PlanetRecord::from_upstream);
        self.save_planet_records(&records, Utc::now()).await
    }

    /// Append already-normalized planets under the given timestamp.
    pub async fn save_planet_records(&self, records: &[PlanetRecord], recorded_at: Timestamp) -> bool {
        if records.is_empty() {
            return true;
        }
        self.insert_planets(records, recorded_at).await
    }

    async fn insert_planets(&self, records: &[PlanetRecord], recorded_at: Timestamp) -> bool {
        let result = async {
            let mut tx = self.pool.begin().await?;
            for record in records {
                PlanetStatusRepo::insert(&mut *tx, record, recorded_at).await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        }
        .await;
        logged("save_planet_status", result.map(|_| true), false)
    }

    pub async fn get_planet_status_history(
        &self,
        planet_index: DbId,
        limit: Option<i64>,
    ) -> Vec<PlanetHistoryEntry> {
        let rows = logged(
            "get_planet_status_history",
            PlanetStatusRepo::history_for_planet(&self.pool, planet_index, limit).await,
            Vec::new(),
        );
        rows.into_iter().map(PlanetHistoryEntry::from).collect()
    }

    /// Most recent status of one planet.
    pub async fn get_latest_planet_status(&self, planet_index: DbId) -> Option<Value> {
        let row = logged(
            "get_latest_planet_status",
            PlanetStatusRepo::latest_for_planet(&self.pool, planet_index).await,
            None,
        );
        row.map(|row| row.data.0)
    }

    /// Planets sharing the most recent timestamp, ordered by index.
    pub async fn get_latest_planets_snapshot(&self) -> Vec<Value> {
        let rows = logged(
            "get_latest_planets_snapshot",
            PlanetStatusRepo::latest_snapshot(&self.pool).await,
            Vec::new(),
        );
        rows.into_iter().map(|row| row.data.0).collect()
    }

    /// Unique biomes of the latest planets snapshot, `None` when there are none.
    pub async fn get_latest_biomes_snapshot(&self) -> Option<Vec<Value>> {
        let planets = self.get_latest_planets_snapshot().await;
        let biomes = unique_biomes(&planets);
        (!biomes.is_empty()).then_some(biomes)
    }

    /// The `factions` field of the latest war status.
    pub async fn get_latest_factions_snapshot(&self) -> Option<Value> {
        self.get_latest_war_status()
            .await
            .and_then(|war| war.get("factions").cloned())
            .filter(|factions| !factions.is_null())
    }

    // -----------------------------------------------------------------------
    // Campaigns
    // -----------------------------------------------------------------------

    /// Upsert a single campaign. Returns `false` for a malformed record.
    pub async fn save_campaign(&self, data: &Value) -> bool {
        match CampaignRecord::from_upstream(data) {
            Ok(record) => self.save_campaign_records(&[record]).await,
            Err(e) => {
                tracing::debug!(error = %e, "Skipping malformed campaign");
                false
            }
        }
    }

    /// Upsert a campaigns listing in one transaction, skipping malformed entries.
    pub async fn save_campaigns(&self, campaigns: &[Value]) -> bool {
        let records = normalize(campaigns, CampaignRecord::from_upstream);
        self.save_campaign_records(&records).await
    }

    /// Upsert normalized campaigns, deriving each status from its expiry.
    pub async fn save_campaign_records(&self, records: &[CampaignRecord]) -> bool {
        if records.is_empty() {
            return true;
        }
        let now = Utc::now();
        let result = async {
            let mut tx = self.pool.begin().await?;
            for record in records {
                let status = campaign::status_at(record.expires_at.as_deref(), now);
                CampaignRepo::upsert(&mut *tx, record, status, now).await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        }
        .await;
        logged("save_campaigns", result.map(|_| true), false)
    }

    /// Campaigns still active right now.
    ///
    /// The persisted status is re-checked against the clock since a campaign
    /// can expire between writes.
    pub async fn get_active_campaigns(&self) -> Vec<Value> {
        let rows = logged(
            "get_active_campaigns",
            CampaignRepo::list_by_status(&self.pool, CampaignStatus::Active).await,
            Vec::new(),
        );
        let now = Utc::now();
        rows.into_iter()
            .filter(|row| campaign::is_active_at(row.status(), row.expires_at.as_deref(), now))
            .map(|row| row.data.0)
            .collect()
    }

    /// Latest row per campaign id, expired ones included.
    pub async fn get_latest_campaigns_snapshot(&self) -> Vec<Value> {
        let rows = logged(
            "get_latest_campaigns_snapshot",
            CampaignRepo::list_all(&self.pool).await,
            Vec::new(),
        );
        rows.into_iter().map(|row| row.data.0).collect()
    }

    // -----------------------------------------------------------------------
    // Assignments, dispatches, planet events
    // -----------------------------------------------------------------------

    pub async fn save_assignments(&self, assignments: &[Value]) -> bool {
        let records = normalize(assignments, AssignmentRecord::from_upstream);
        let now = Utc::now();
        let result = async {
            let mut tx = self.pool.begin().await?;
            for record in &records {
                AssignmentRepo::upsert(&mut *tx, record, now).await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        }
        .await;
        logged("save_assignments", result.map(|_| true), false)
    }

    pub async fn get_latest_assignments(&self, limit: Option<i64>, order: SortOrder) -> Vec<Value> {
        let rows = logged(
            "get_latest_assignments",
            AssignmentRepo::list(&self.pool, limit, order).await,
            Vec::new(),
        );
        rows.into_iter().map(|row| row.data.0).collect()
    }

    pub async fn save_dispatches(&self, dispatches: &[Value]) -> bool {
        let records = normalize(dispatches, DispatchRecord::from_upstream);
        let now = Utc::now();
        let result = async {
            let mut tx = self.pool.begin().await?;
            for record in &records {
                DispatchRepo::upsert(&mut *tx, record, now).await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        }
        .await;
        logged("save_dispatches", result.map(|_| true), false)
    }

    pub async fn get_latest_dispatches(&self, limit: Option<i64>, order: SortOrder) -> Vec<Value> {
        let rows = logged(
            "get_latest_dispatches",
            DispatchRepo::list(&self.pool, limit, order).await,
            Vec::new(),
        );
        rows.into_iter().map(|row| row.data.0).collect()
    }

    pub async fn save_planet_events(&self, events: &[Value]) -> bool {
        let records = normalize(events, PlanetEventRecord::from_upstream);
        let now = Utc::now();
        let result = async {
            let mut tx = self.pool.begin().await?;
            for record in &records {
                PlanetEventRepo::upsert(&mut *tx, record, now).await?;
            }
            tx.commit().await?;
            Ok::<_, sqlx::Error>(())
        }
        .await;
        logged("save_planet_events", result.map(|_| true), false)
    }

    pub async fn get_latest_planet_events(
        &self,
        limit: Option<i64>,
        order: SortOrder,
        planet_index: Option<DbId>,
    ) -> Vec<Value> {
        let rows = logged(
            "get_latest_planet_events",
            PlanetEventRepo::list(&self.pool, planet_index, limit, order).await,
            Vec::new(),
        );
        rows.into_iter().map(|row| row.data.0).collect()
    }

    // -----------------------------------------------------------------------
    // Upstream availability
    // -----------------------------------------------------------------------

    pub async fn set_upstream_status(&self, available: bool) -> bool {
        let value = if available { "true" } else { "false" };
        let result = SystemStatusRepo::upsert(&self.pool, UPSTREAM_AVAILABLE_KEY, value, Utc::now()).await;
        logged("set_upstream_status", result.map(|_| true), false)
    }

    /// Whether the last collection cycle succeeded. `false` until one has.
    pub async fn get_upstream_status(&self) -> bool {
        let entry = logged(
            "get_upstream_status",
            SystemStatusRepo::get(&self.pool, UPSTREAM_AVAILABLE_KEY).await,
            None,
        );
        entry.and_then(|e| e.value).as_deref() == Some("true")
    }
}
