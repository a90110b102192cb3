//! Live-then-cache lookups for the resources that have a fallback path.
//!
//! Each lookup tries the upstream first and writes fresh data through to
//! the cache. When the upstream has nothing, the matching cache snapshot is
//! consulted. Only when both come up empty is the resource unavailable.
//! An empty live result is still [`Lookup::Live`].

use hc_core::types::DbId;
use hc_db::CacheStore;
use hc_upstream::GameDataSource;
use serde_json::Value;

use crate::cycle::CycleRunner;

/// Where a looked-up value came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Live(T),
    Cached(T),
    Unavailable,
}

impl<T> Lookup<T> {
    fn from_cache(cached: Option<T>) -> Self {
        cached.map_or(Self::Unavailable, Self::Cached)
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Live(value) | Self::Cached(value) => Some(value),
            Self::Unavailable => None,
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }
}

fn non_empty(items: Vec<Value>) -> Option<Vec<Value>> {
    (!items.is_empty()).then_some(items)
}

/// Resource lookups and manual refreshes.
#[derive(Clone)]
pub struct ResourceQuery {
    runner: CycleRunner,
}

impl ResourceQuery {
    pub fn new(runner: CycleRunner) -> Self {
        Self { runner }
    }

    fn source(&self) -> &dyn GameDataSource {
        self.runner.source().as_ref()
    }

    fn store(&self) -> &CacheStore {
        self.runner.store()
    }

    // ---- live with fallback ----

    pub async fn campaigns(&self) -> Lookup<Vec<Value>> {
        if let Some(campaigns) = self.source().campaigns().await {
            self.store().save_campaigns(&campaigns).await;
            return Lookup::Live(campaigns);
        }
        let cached = non_empty(self.store().get_latest_campaigns_snapshot().await);
        Lookup::from_cache(cached)
    }

    pub async fn planets(&self) -> Lookup<Vec<Value>> {
        if let Some(planets) = self.source().planets().await {
            self.store().save_planet_snapshot(&planets).await;
            return Lookup::Live(planets);
        }
        let cached = non_empty(self.store().get_latest_planets_snapshot().await);
        Lookup::from_cache(cached)
    }

    /// Single planet, falling back to its most recent history entry.
    pub async fn planet(&self, index: DbId) -> Lookup<Value> {
        if let Some(planet) = self.runner.collect_planet_data(index).await {
            return Lookup::Live(planet);
        }
        let cached = self.store().get_latest_planet_status(index).await;
        Lookup::from_cache(cached)
    }

    pub async fn factions(&self) -> Lookup<Value> {
        if let Some(factions) = self.source().factions().await {
            return Lookup::Live(factions);
        }
        let cached = self.store().get_latest_factions_snapshot().await;
        Lookup::from_cache(cached)
    }

    pub async fn biomes(&self) -> Lookup<Vec<Value>> {
        if let Some(biomes) = self.source().biomes().await {
            return Lookup::Live(biomes);
        }
        let cached = self.store().get_latest_biomes_snapshot().await;
        Lookup::from_cache(cached)
    }

    // ---- live-only refreshes ----
    //
    // `None` means the upstream had nothing or the write failed.

    pub async fn refresh_war_status(&self) -> Option<Value> {
        let war = self.source().war_status().await?;
        persisted("war_status", self.store().save_war_status(&war).await, war)
    }

    pub async fn refresh_statistics(&self) -> Option<Value> {
        let statistics = self.source().statistics().await?;
        persisted(
            "statistics",
            self.store().save_statistics(&statistics).await,
            statistics,
        )
    }

    pub async fn refresh_assignments(&self) -> Option<Vec<Value>> {
        let assignments = self.source().assignments().await?;
        persisted(
            "assignments",
            self.store().save_assignments(&assignments).await,
            assignments,
        )
    }

    pub async fn refresh_dispatches(&self) -> Option<Vec<Value>> {
        let dispatches = self.source().dispatches().await?;
        persisted(
            "dispatches",
            self.store().save_dispatches(&dispatches).await,
            dispatches,
        )
    }

    pub async fn refresh_planet_events(&self) -> Option<Vec<Value>> {
        let events = self.source().planet_events().await?;
        persisted(
            "planet_events",
            self.store().save_planet_events(&events).await,
            events,
        )
    }
}

fn persisted<T>(resource: &'static str, saved: bool, value: T) -> Option<T> {
    if saved {
        Some(value)
    } else {
        tracing::error!(resource, "Refresh fetched data but failed to persist it");
        None
    }
}
