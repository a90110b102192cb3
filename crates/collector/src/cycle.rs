//! One "collect all" pass over every upstream resource.

use std::sync::Arc;

use chrono::Utc;
use hc_core::records::{CampaignRecord, PlanetRecord};
use hc_core::types::DbId;
use hc_db::cache::normalize;
use hc_db::CacheStore;
use hc_upstream::GameDataSource;
use serde_json::Value;
use tokio::task::JoinError;

use crate::error::CollectError;

/// What a cycle fetched and persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Resources for which the upstream returned data.
    pub resources_fetched: u32,
    pub war_status: bool,
    pub statistics: bool,
    pub planets: usize,
    pub campaigns: usize,
    pub assignments: usize,
    pub dispatches: usize,
    pub planet_events: usize,
    /// Store writes that reported failure.
    pub write_failures: u32,
}

impl CycleReport {
    fn record_write(&mut self, ok: bool) {
        if !ok {
            self.write_failures += 1;
        }
    }
}

/// Runs collection cycles against a data source and a cache store.
#[derive(Clone)]
pub struct CycleRunner {
    source: Arc<dyn GameDataSource>,
    store: CacheStore,
}

impl CycleRunner {
    pub fn new(source: Arc<dyn GameDataSource>, store: CacheStore) -> Self {
        Self { source, store }
    }

    pub fn source(&self) -> &Arc<dyn GameDataSource> {
        &self.source
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Fetch and persist every resource, then record upstream availability.
    ///
    /// The cycle runs in its own task so a panic anywhere inside it is
    /// contained here. Only a panic marks the upstream unavailable; a cycle
    /// that runs to completion marks it available, even when every fetch
    /// came back empty. Writes completed before a panic are kept.
    pub async fn collect_all(&self) -> Result<CycleReport, CollectError> {
        let runner = self.clone();
        let result = tokio::spawn(async move { runner.run_cycle().await })
            .await
            .map_err(|e| CollectError::Aborted(join_error_message(e)));

        match &result {
            Ok(report) => {
                self.store.set_upstream_status(true).await;
                tracing::info!(
                    resources_fetched = report.resources_fetched,
                    planets = report.planets,
                    campaigns = report.campaigns,
                    assignments = report.assignments,
                    dispatches = report.dispatches,
                    planet_events = report.planet_events,
                    write_failures = report.write_failures,
                    "Collection cycle complete",
                );
            }
            Err(e) => {
                self.store.set_upstream_status(false).await;
                tracing::error!(error = %e, "Collection cycle failed");
            }
        }

        result
    }

    /// Fetch one planet and append it to its history.
    ///
    /// Independent of the periodic cycle: it never touches the upstream
    /// availability flag.
    pub async fn collect_planet_data(&self, index: DbId) -> Option<Value> {
        let runner = self.clone();
        let task = tokio::spawn(async move {
            let planet = runner.source.planet(index).await?;
            if !runner.store.save_planet_status(index, &planet).await {
                tracing::warn!(planet_index = index, "Failed to persist planet status");
            }
            Some(planet)
        });

        match task.await {
            Ok(planet) => planet,
            Err(e) => {
                tracing::error!(planet_index = index, error = %join_error_message(e), "Planet collection aborted");
                None
            }
        }
    }

    async fn run_cycle(&self) -> CycleReport {
        let mut report = CycleReport::default();

        if let Some(war) = self.source.war_status().await {
            report.resources_fetched += 1;
            report.war_status = self.store.save_war_status(&war).await;
            report.record_write(report.war_status);

            if let Some(statistics) = war.get("statistics").filter(|s| !s.is_null()) {
                report.statistics = self.store.save_statistics(statistics).await;
                report.record_write(report.statistics);
            }
        }

        if let Some(planets) = self.source.planets().await {
            report.resources_fetched += 1;
            let records = normalize(&planets, PlanetRecord::from_upstream);
            let ok = self.store.save_planet_records(&records, Utc::now()).await;
            report.record_write(ok);
            if ok {
                report.planets = records.len();
            }
        }

        if let Some(campaigns) = self.source.campaigns().await {
            report.resources_fetched += 1;
            let records = normalize(&campaigns, CampaignRecord::from_upstream);
            let ok = self.store.save_campaign_records(&records).await;
            report.record_write(ok);
            if ok {
                report.campaigns = records.len();
            }
        }

        if let Some(assignments) = self.source.assignments().await {
            report.resources_fetched += 1;
            if !assignments.is_empty() {
                let ok = self.store.save_assignments(&assignments).await;
                report.record_write(ok);
                if ok {
                    report.assignments = assignments.len();
                }
            }
        }

        if let Some(dispatches) = self.source.dispatches().await {
            report.resources_fetched += 1;
            if !dispatches.is_empty() {
                let ok = self.store.save_dispatches(&dispatches).await;
                report.record_write(ok);
                if ok {
                    report.dispatches = dispatches.len();
                }
            }
        }

        if let Some(events) = self.source.planet_events().await {
            report.resources_fetched += 1;
            if !events.is_empty() {
                let ok = self.store.save_planet_events(&events).await;
                report.record_write(ok);
                if ok {
                    report.planet_events = events.len();
                }
            }
        }

        if report.resources_fetched == 0 {
            tracing::warn!("Collection cycle fetched nothing from the upstream API");
        }
        report
    }
}

fn join_error_message(error: JoinError) -> String {
    if error.is_cancelled() {
        return "task cancelled".to_string();
    }
    let payload = error.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic".to_string())
}
